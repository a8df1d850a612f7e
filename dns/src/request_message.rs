use crate::error::EncodeError;
use crate::header::Header;
use crate::question::Question;

pub struct RequestMessage {
    header: Header,
    question: Question,
}

impl RequestMessage {
    pub fn new(id: u16, domain: &str) -> Self {
        let header = Header::query(id);
        let question = Question::new(domain);

        Self { header, question }
    }

    pub fn id(&self) -> u16 {
        self.header.id()
    }

    pub fn to_bytes(&self, bytes: &mut Vec<u8>) -> Result<(), EncodeError> {
        self.header.to_bytes(bytes);
        self.question.to_bytes(bytes)?;

        Ok(())
    }
}
