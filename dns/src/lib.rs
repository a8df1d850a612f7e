//! DNS message codec: iterative `A` queries out, full responses in.
//!
//! <https://datatracker.ietf.org/doc/html/rfc1035#section-4>

mod error;
mod header;
mod question;
mod request_message;
mod resource_record;
mod response_message;
mod utils;

pub use error::{EncodeError, MessageError};
pub use header::Header;
pub use question::Question;
pub use resource_record::{RData, RecordType, ResourceRecord};
pub use response_message::ResponseMessage;
pub use utils::read_name;

pub fn encode_request(domain: &str, id: u16) -> Result<Vec<u8>, EncodeError> {
    let request_msg = request_message::RequestMessage::new(id, domain);
    let mut request_bytes: Vec<u8> = vec![];
    request_msg.to_bytes(&mut request_bytes)?;

    Ok(request_bytes)
}

pub fn decode_response(response_bytes: &[u8]) -> Result<ResponseMessage, MessageError> {
    ResponseMessage::parse_response(response_bytes)
}
