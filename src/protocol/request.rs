use super::fields::FieldBag;
use super::message::{MessageType, ProtocolVersion};

/// A request ready to hand to the message builder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Request {
    Query(QueryRequest),
    Set(SetRequest),
}

impl Request {
    pub fn message_type(&self) -> MessageType {
        match self {
            Request::Query(_) => MessageType::Query,
            Request::Set(_) => MessageType::Set,
        }
    }

    pub fn protocol(&self) -> ProtocolVersion {
        match self {
            Request::Query(q) => q.protocol,
            Request::Set(s) => s.protocol,
        }
    }
}

/// Asks the appliance for a full status frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct QueryRequest {
    pub protocol: ProtocolVersion,
}

impl QueryRequest {
    pub fn new(protocol: ProtocolVersion) -> Self {
        Self { protocol }
    }
}

/// Full set of writable fields, plus whatever unmodeled fields the last
/// status frame carried.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetRequest {
    pub protocol: ProtocolVersion,
    pub fields: FieldBag,
}

impl SetRequest {
    pub fn new(protocol: ProtocolVersion, fields: FieldBag) -> Self {
        Self { protocol, fields }
    }
}

impl From<QueryRequest> for Request {
    fn from(query: QueryRequest) -> Self {
        Request::Query(query)
    }
}

impl From<SetRequest> for Request {
    fn from(set: SetRequest) -> Self {
        Request::Set(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_tags_test() {
        let query: Request = QueryRequest::new(ProtocolVersion(2)).into();
        assert_eq!(query.message_type(), MessageType::Query);
        assert_eq!(query.protocol(), ProtocolVersion(2));

        let set: Request = SetRequest::new(ProtocolVersion(3), FieldBag::new()).into();
        assert_eq!(set.message_type(), MessageType::Set);
        assert_eq!(set.protocol(), ProtocolVersion(3));
    }
}
