use crate::error::{EncodeError, MessageError};
use byteorder::{ReadBytesExt, BE};
use std::collections::HashSet;
use std::io::Cursor;

// https://datatracker.ietf.org/doc/html/rfc1035#section-2.3.4
pub const MAX_LABEL_LEN: usize = 63;
pub const MAX_NAME_LEN: usize = 255;

const LABEL_TAG_MASK: u8 = 0b1100_0000;
const LABEL_TAG_LITERAL: u8 = 0b0000_0000;
const LABEL_TAG_POINTER: u8 = 0b1100_0000;

// 把域名转换为长度前缀的 qname，以 0 结尾
pub fn domain_to_qname(domain: &str) -> Result<Vec<u8>, EncodeError> {
    let domain = domain.strip_suffix('.').unwrap_or(domain);
    let mut qname: Vec<u8> = Vec::with_capacity(domain.len() + 2);

    if !domain.is_empty() {
        for label in domain.split('.') {
            if label.is_empty() {
                return Err(EncodeError::EmptyLabel);
            }
            if label.len() > MAX_LABEL_LEN {
                return Err(EncodeError::LabelTooLong {
                    label: label.to_string(),
                    len: label.len(),
                });
            }

            qname.push(label.len() as u8);
            qname.extend_from_slice(label.as_bytes());
        }
    }

    qname.push(0);

    if qname.len() > MAX_NAME_LEN {
        return Err(EncodeError::NameTooLong(qname.len()));
    }

    Ok(qname)
}

/// Reads the (possibly compressed) domain name that starts at `start`.
///
/// Returns the dotted name and the number of bytes the name occupies at
/// `start`. Bytes reached by following a compression pointer are not
/// counted. Every offset visited while expanding this one name is
/// remembered, so a pointer cycle fails with [`MessageError::PointerLoop`].
pub fn read_name(message: &[u8], start: usize) -> Result<(String, usize), MessageError> {
    let mut labels: Vec<String> = Vec::new();
    let mut visited: HashSet<usize> = HashSet::new();
    let mut consumed: Option<usize> = None;
    // the terminating root label
    let mut name_len = 1;
    let mut index = start;

    loop {
        if !visited.insert(index) {
            return Err(MessageError::PointerLoop(index));
        }

        let label_len = *message
            .get(index)
            .ok_or_else(|| MessageError::truncated(1, index))?;

        match label_len & LABEL_TAG_MASK {
            LABEL_TAG_LITERAL if label_len == 0 => {
                let consumed = consumed.unwrap_or(index + 1 - start);
                return Ok((labels.join("."), consumed));
            }
            LABEL_TAG_LITERAL => {
                let begin = index + 1;
                let end = begin + label_len as usize;
                let label_bytes = message
                    .get(begin..end)
                    .ok_or_else(|| MessageError::truncated(label_len as usize, begin))?;
                if label_bytes.contains(&b'.') {
                    return Err(MessageError::DotInLabel(index));
                }

                name_len += label_len as usize + 1;
                if name_len > MAX_NAME_LEN {
                    return Err(MessageError::NameTooLong(start));
                }

                labels.push(String::from_utf8_lossy(label_bytes).to_string());
                index = end;
            }
            LABEL_TAG_POINTER => {
                let low = *message
                    .get(index + 1)
                    .ok_or_else(|| MessageError::truncated(2, index))?;
                let target = (usize::from(label_len & !LABEL_TAG_MASK) << 8) | usize::from(low);

                if consumed.is_none() {
                    consumed = Some(index + 2 - start);
                }
                if target >= message.len() {
                    return Err(MessageError::PointerOutOfRange(target));
                }

                index = target;
            }
            _ => {
                return Err(MessageError::BadLabelType {
                    offset: index,
                    tag: label_len & LABEL_TAG_MASK,
                })
            }
        }
    }
}

/// Reads a domain name at the cursor and moves the cursor past it.
pub fn read_name_at_cursor(rdr: &mut Cursor<&[u8]>) -> Result<String, MessageError> {
    let start = rdr.position() as usize;
    let (name, consumed) = read_name(rdr.get_ref(), start)?;
    rdr.set_position((start + consumed) as u64);

    Ok(name)
}

pub fn read_u16(rdr: &mut Cursor<&[u8]>) -> Result<u16, MessageError> {
    let offset = rdr.position() as usize;
    rdr.read_u16::<BE>()
        .map_err(|_| MessageError::truncated(2, offset))
}

pub fn read_u32(rdr: &mut Cursor<&[u8]>) -> Result<u32, MessageError> {
    let offset = rdr.position() as usize;
    rdr.read_u32::<BE>()
        .map_err(|_| MessageError::truncated(4, offset))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_to_qname_test() {
        let qname = domain_to_qname("www.example.com").unwrap();
        let expected = [
            3, b'w', b'w', b'w', 7, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 3, b'c', b'o', b'm',
            0,
        ];
        assert_eq!(qname, expected);
    }

    #[test]
    fn trailing_dot_is_ignored() {
        assert_eq!(
            domain_to_qname("baidu.com.").unwrap(),
            domain_to_qname("baidu.com").unwrap()
        );
        assert_eq!(domain_to_qname(".").unwrap(), vec![0]);
    }

    #[test]
    fn rejects_bad_labels() {
        let long_label = "a".repeat(64);
        let err = domain_to_qname(&format!("{}.com", long_label)).unwrap_err();
        assert_eq!(
            err,
            EncodeError::LabelTooLong {
                label: long_label,
                len: 64
            }
        );

        assert_eq!(
            domain_to_qname("www..com").unwrap_err(),
            EncodeError::EmptyLabel
        );

        let label = "a".repeat(63);
        let name = vec![label.as_str(); 4].join(".");
        assert_eq!(
            domain_to_qname(&name).unwrap_err(),
            EncodeError::NameTooLong(257)
        );
    }

    #[test]
    fn read_plain_name() {
        let message = [0xff, 3, b'w', b'w', b'w', 2, b'c', b'n', 0, 0xee];
        let (name, consumed) = read_name(&message, 1).unwrap();
        assert_eq!(name, "www.cn");
        assert_eq!(consumed, 8);
    }

    #[test]
    fn read_compressed_name() {
        // "z.cn" at offset 0, then "www" + pointer to 0 at offset 6
        let message = [1, b'z', 2, b'c', b'n', 0, 3, b'w', b'w', b'w', 0xc0, 0];
        let (name, consumed) = read_name(&message, 6).unwrap();
        assert_eq!(name, "www.z.cn");
        assert_eq!(consumed, 6);

        let (name, consumed) = read_name(&message, 10).unwrap();
        assert_eq!(name, "z.cn");
        assert_eq!(consumed, 2);
    }

    #[test]
    fn pointer_to_itself_fails() {
        let message = [0xc0, 0];
        assert_eq!(
            read_name(&message, 0).unwrap_err(),
            MessageError::PointerLoop(0)
        );
    }

    #[test]
    fn pointer_cycle_fails() {
        // offset 0: "a" then pointer to 4; offset 4: "b" then pointer back to 0
        let message = [1, b'a', 0xc0, 4, 1, b'b', 0xc0, 0];
        assert_eq!(
            read_name(&message, 0).unwrap_err(),
            MessageError::PointerLoop(0)
        );
    }

    #[test]
    fn pointer_out_of_range_fails() {
        let message = [0xc0, 0x20];
        assert_eq!(
            read_name(&message, 0).unwrap_err(),
            MessageError::PointerOutOfRange(0x20)
        );
    }

    #[test]
    fn reserved_label_type_fails() {
        let message = [0x40, 0];
        assert_eq!(
            read_name(&message, 0).unwrap_err(),
            MessageError::BadLabelType {
                offset: 0,
                tag: 0x40
            }
        );
    }

    #[test]
    fn truncated_label_fails() {
        let message = [5, b'a', b'b'];
        assert_eq!(
            read_name(&message, 0).unwrap_err(),
            MessageError::Truncated {
                needed: 5,
                offset: 1
            }
        );

        let missing_terminator = [1, b'a'];
        assert!(matches!(
            read_name(&missing_terminator, 0),
            Err(MessageError::Truncated { .. })
        ));
    }

    #[test]
    fn dot_inside_label_fails() {
        // "x" then a single label "a.b", which would read back as two labels
        let message = [1, b'x', 3, b'a', b'.', b'b', 0];
        assert_eq!(
            read_name(&message, 0).unwrap_err(),
            MessageError::DotInLabel(2)
        );
    }
}
