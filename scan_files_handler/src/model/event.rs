use aws_lambda_events::s3::S3Event;
use lambda_runtime::tracing;

use crate::error::ScanFilesErr;

/// The bucket and key of the object that triggered the lambda
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    pub bucket: String,
    /// The object key with the s3 notification encoding removed
    pub object_key: String,
}

impl TryFrom<&S3Event> for StorageEvent {
    type Error = ScanFilesErr;

    /// Only the first record of the event is processed
    fn try_from(event: &S3Event) -> Result<Self, Self::Error> {
        let record = event
            .records
            .first()
            .ok_or(ScanFilesErr::MalformedEvent("event contains no records"))?;

        if event.records.len() > 1 {
            tracing::warn!(
                record_count = event.records.len(),
                "ignoring all but the first record"
            );
        }

        let bucket = record
            .s3
            .bucket
            .name
            .as_deref()
            .filter(|name| !name.is_empty())
            .ok_or(ScanFilesErr::MalformedEvent("record has no bucket name"))?;

        let key = record
            .s3
            .object
            .key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(ScanFilesErr::MalformedEvent("record has no object key"))?;

        Ok(Self {
            bucket: bucket.to_string(),
            object_key: decode_object_key(key),
        })
    }
}

/// Decodes an object key from an s3 notification.
/// Spaces arrive as `+` and reserved characters are percent encoded.
/// Byte sequences that are not valid UTF-8 are replaced with U+FFFD.
pub fn decode_object_key(key: &str) -> String {
    let unplussed = key.replace('+', " ");
    let decoded = urlencoding::decode_binary(unplussed.as_bytes());
    String::from_utf8_lossy(&decoded).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cool_asserts::assert_matches;

    fn s3_event(records: serde_json::Value) -> S3Event {
        serde_json::from_value(serde_json::json!({ "Records": records })).unwrap()
    }

    fn record(bucket: Option<&str>, key: Option<&str>) -> serde_json::Value {
        serde_json::json!({
            "eventVersion": "2.1",
            "eventSource": "aws:s3",
            "awsRegion": "ca-central-1",
            "eventTime": "2024-05-01T12:00:00.000Z",
            "eventName": "ObjectCreated:Put",
            "userIdentity": { "principalId": "EXAMPLE" },
            "requestParameters": { "sourceIPAddress": "127.0.0.1" },
            "responseElements": {
                "x-amz-request-id": "EXAMPLE123456789",
                "x-amz-id-2": "EXAMPLE123/5678abcdefghijklambdaisawesome/mnopqrstuvwxyzABCDEFGH"
            },
            "s3": {
                "s3SchemaVersion": "1.0",
                "configurationId": "scan-on-upload",
                "bucket": {
                    "name": bucket,
                    "ownerIdentity": { "principalId": "EXAMPLE" },
                    "arn": "arn:aws:s3:::example-bucket"
                },
                "object": {
                    "key": key,
                    "size": 1024,
                    "eTag": "0123456789abcdef0123456789abcdef",
                    "sequencer": "0A1B2C3D4E5F678901"
                }
            }
        })
    }

    #[test]
    fn it_decodes_plus_and_percent_sequences() {
        assert_eq!(decode_object_key("a+b%2Fc"), "a b/c");
        assert_eq!(decode_object_key("1%2B1%3D2.txt"), "1+1=2.txt");
        assert_eq!(decode_object_key("plain/key.pdf"), "plain/key.pdf");
    }

    #[test]
    fn it_decodes_multibyte_utf8() {
        assert_eq!(decode_object_key("r%C3%A9sum%C3%A9.pdf"), "résumé.pdf");
    }

    #[test]
    fn it_replaces_invalid_utf8() {
        assert_eq!(decode_object_key("bad%FF.txt"), "bad\u{FFFD}.txt");
    }

    #[test]
    fn it_extracts_bucket_and_decoded_key() {
        let event = s3_event(serde_json::json!([record(
            Some("example-bucket"),
            Some("uploads/annual+report%282024%29.pdf")
        )]));

        let storage_event = StorageEvent::try_from(&event).unwrap();

        assert_eq!(
            storage_event,
            StorageEvent {
                bucket: "example-bucket".to_string(),
                object_key: "uploads/annual report(2024).pdf".to_string(),
            }
        );
    }

    #[test]
    fn it_only_uses_the_first_record() {
        let event = s3_event(serde_json::json!([
            record(Some("first-bucket"), Some("first.txt")),
            record(Some("second-bucket"), Some("second.txt")),
        ]));

        let storage_event = StorageEvent::try_from(&event).unwrap();

        assert_eq!(storage_event.bucket, "first-bucket");
        assert_eq!(storage_event.object_key, "first.txt");
    }

    #[test]
    fn it_rejects_an_event_without_records() {
        let event = s3_event(serde_json::json!([]));

        assert_matches!(
            StorageEvent::try_from(&event),
            Err(ScanFilesErr::MalformedEvent("event contains no records"))
        );
    }

    #[test]
    fn it_rejects_a_record_without_a_bucket() {
        let event = s3_event(serde_json::json!([record(None, Some("key.txt"))]));

        assert_matches!(
            StorageEvent::try_from(&event),
            Err(ScanFilesErr::MalformedEvent("record has no bucket name"))
        );
    }

    #[test]
    fn it_rejects_a_record_without_a_key() {
        let event = s3_event(serde_json::json!([record(Some("example-bucket"), None)]));

        assert_matches!(
            StorageEvent::try_from(&event),
            Err(ScanFilesErr::MalformedEvent("record has no object key"))
        );
    }
}
