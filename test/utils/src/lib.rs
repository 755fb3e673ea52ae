#![deny(clippy::implicit_return)]
#![allow(clippy::needless_return)]

/// Response body of `GET doc` with one document per processing status.
pub fn documents_fixture() -> &'static str {
    return r#"
[
  {
    "documentid": "d1",
    "userid": "u1",
    "filename": "annual-report.pdf",
    "filesize": "1500000",
    "docstatus": "READY",
    "created": "2024-01-01T09:05:00.000000Z",
    "pages": "42",
    "conversations": [
      { "conversationid": "c1", "created": "2024-01-01T09:05:00.000000Z" }
    ]
  },
  {
    "documentid": "d2",
    "userid": "u1",
    "filename": "contract.pdf",
    "filesize": "2048",
    "docstatus": "PROCESSING",
    "created": "2024-02-10T16:30:00.000000Z",
    "pages": "3",
    "conversations": [
      { "conversationid": "c9", "created": "2024-02-10T16:30:00.000000Z" }
    ]
  },
  {
    "documentid": "d3",
    "userid": "u1",
    "filename": "notes.pdf",
    "filesize": "512",
    "docstatus": "UPLOADED",
    "created": "2024-03-03T00:00:00.000000Z",
    "pages": "1",
    "conversations": []
  }
]
"#
    .trim();
}

/// Response body of `GET doc/d1/c1` after one question and answer.
pub fn conversation_fixture() -> &'static str {
    return r#"
{
  "conversationid": "c1",
  "document": {
    "documentid": "d1",
    "userid": "u1",
    "filename": "annual-report.pdf",
    "filesize": "1500000",
    "docstatus": "READY",
    "created": "2024-01-01T09:05:00.000000Z",
    "pages": "42",
    "conversations": [
      { "conversationid": "c1", "created": "2024-01-01T09:05:00.000000Z" }
    ]
  },
  "messages": [
    {
      "type": "human",
      "data": { "content": "What was the revenue?", "example": false, "additional_kwargs": {} }
    },
    {
      "type": "ai",
      "data": { "content": "Revenue was 12 million.", "example": false, "additional_kwargs": { "stop_reason": "end_turn" } }
    }
  ]
}
"#
    .trim();
}
