use crate::{error::ScanFilesErr, model::ScanResponse};

pub static SCAN_ID_TAG: &str = "scan_id";
pub static SCAN_STATUS_TAG: &str = "scan_status";

/// The state an object is left in once the scan request resolves.
/// There is no transition out of either state in this lambda.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ScanStatus {
    /// The Scan Files API accepted the object
    InProgress,
    /// The Scan Files API responded with anything other than a 200
    FailedToScan,
}

impl ScanStatus {
    pub fn from_status_code(status_code: u16) -> Self {
        match status_code {
            200 => ScanStatus::InProgress,
            _ => ScanStatus::FailedToScan,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// The complete, ordered set of tags for an object.
/// Writing a [TagSet] replaces every tag already on the object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSet(Vec<Tag>);

impl TagSet {
    /// Builds the tags that record the outcome of a completed scan request.
    /// Only the status code decides the outcome, the body is read for the scan id on success.
    pub fn for_scan_response(response: &ScanResponse) -> Result<Self, ScanFilesErr> {
        match ScanStatus::from_status_code(response.status_code) {
            ScanStatus::InProgress => {
                let scan_id = response.scan_id().ok_or(ScanFilesErr::MissingScanId)?;
                Ok(Self(vec![
                    Tag::new(SCAN_ID_TAG, scan_id),
                    Tag::new(SCAN_STATUS_TAG, ScanStatus::InProgress.to_string()),
                ]))
            }
            ScanStatus::FailedToScan => Ok(Self(vec![Tag::new(
                SCAN_STATUS_TAG,
                ScanStatus::FailedToScan.to_string(),
            )])),
        }
    }

    pub fn as_slice(&self) -> &[Tag] {
        &self.0
    }

    /// The value of the `scan_status` tag
    pub fn scan_status(&self) -> Option<&str> {
        self.0
            .iter()
            .find(|tag| tag.key == SCAN_STATUS_TAG)
            .map(|tag| tag.value.as_str())
    }
}

impl IntoIterator for TagSet {
    type Item = Tag;
    type IntoIter = std::vec::IntoIter<Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
