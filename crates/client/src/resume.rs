//! Resume links and downloads.

use folio_core::resume::{ResumeKind, ResumeLinkMode};

use crate::api::CmsApi;
use crate::error::ClientResult;

/// Produces resume links in the configured mode.
#[derive(Debug, Clone, Copy)]
pub struct ResumeLinks<'a> {
    api: &'a CmsApi,
    mode: ResumeLinkMode,
}

impl<'a> ResumeLinks<'a> {
    pub fn new(api: &'a CmsApi, mode: ResumeLinkMode) -> Self {
        Self { api, mode }
    }

    pub fn mode(&self) -> ResumeLinkMode {
        self.mode
    }

    /// A URL the file can be fetched from right now. Presigned links expire;
    /// ask again for each download.
    pub async fn link(&self, kind: ResumeKind) -> ClientResult<String> {
        match self.mode {
            ResumeLinkMode::Direct => Ok(self.api.resume_url(kind)),
            ResumeLinkMode::Presigned => {
                let link = self.api.presigned_resume(kind).await?;
                tracing::debug!(
                    kind = %kind,
                    expires_in = ?link.expires_in,
                    "Got presigned resume link"
                );
                Ok(link.url)
            }
        }
    }

    /// Fetch the PDF bytes.
    pub async fn download(&self, kind: ResumeKind) -> ClientResult<Vec<u8>> {
        let url = self.link(kind).await?;
        let bytes = self.api.download(&url).await?;
        tracing::info!(kind = %kind, bytes = bytes.len(), "Resume downloaded");
        Ok(bytes)
    }
}
