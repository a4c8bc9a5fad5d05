use std::fmt;

use thiserror::Error;

pub const TOKEN_ENV: &str = "FRAME_IO_TOKEN";
pub const FOLDER_ID_ENV: &str = "FRAME_IO_FOLDER_ID";

/// Credentials needed to list the gallery folder on Frame.io.
#[derive(Clone, PartialEq, Eq)]
pub struct FrameIoConfig {
    pub token: String,
    pub folder_id: String,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("missing configuration: {}", .missing.join(", "))]
pub struct MissingConfig {
    pub missing: Vec<&'static str>,
}

impl FrameIoConfig {
    /// Empty values count as absent.
    pub fn from_parts(
        token: Option<String>,
        folder_id: Option<String>,
    ) -> Result<FrameIoConfig, MissingConfig> {
        let token = token.filter(|t| !t.is_empty());
        let folder_id = folder_id.filter(|f| !f.is_empty());

        match (token, folder_id) {
            (Some(token), Some(folder_id)) => Ok(FrameIoConfig { token, folder_id }),
            (token, folder_id) => {
                let mut missing = Vec::new();
                if token.is_none() {
                    missing.push(TOKEN_ENV);
                }
                if folder_id.is_none() {
                    missing.push(FOLDER_ID_ENV);
                }
                Err(MissingConfig { missing })
            },
        }
    }
}

impl fmt::Debug for FrameIoConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameIoConfig")
            .field("token", &"<redacted>")
            .field("folder_id", &self.folder_id)
            .finish()
    }
}
