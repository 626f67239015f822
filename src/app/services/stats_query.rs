//! Ownership-scoped statistics, history and report queries
//!
//! This service is the read boundary of the pipeline. Every call receives a
//! [`Requester`] and ownership is checked exactly once here (or in the store
//! for deletions); aggregation itself never sees identities. A missing
//! upload id and a foreign-owned one produce the same generic error so the
//! existence of other users' data never leaks.

use tracing::debug;

use crate::app::models::{AggregationResult, Requester, Upload, UploadSummary};
use crate::app::services::aggregator::Aggregator;
use crate::app::services::report::{self, ReportModel};
use crate::app::services::upload_store::Database;
use crate::{Error, Result};

/// Read-side query service over the upload store
#[derive(Clone)]
pub struct StatsService {
    db: Database,
    aggregator: Aggregator,
}

impl StatsService {
    /// Create a service using the default aggregation engine
    pub fn new(db: Database) -> Self {
        Self {
            db,
            aggregator: Aggregator::new(),
        }
    }

    /// Create a service with a custom aggregation engine (e.g. a different
    /// classification rule)
    pub fn with_aggregator(db: Database, aggregator: Aggregator) -> Self {
        Self { db, aggregator }
    }

    /// Aggregated statistics for one upload.
    ///
    /// With `upload_id` omitted, the requester's most recent upload is used;
    /// a requester with no uploads gets the empty result, not an error.
    pub async fn stats_for(
        &self,
        upload_id: Option<i64>,
        requester: &Requester,
    ) -> Result<AggregationResult> {
        let upload = match self.resolve_upload(upload_id, requester).await? {
            Some(upload) => upload,
            None => {
                debug!("No uploads for '{}', returning empty stats", requester.user_id);
                return Ok(AggregationResult::empty());
            }
        };

        let readings = self.db.readings_for_upload(upload.id).await?;
        Ok(self.aggregator.aggregate(&readings))
    }

    /// The requester's upload history, newest first, never more than the
    /// retention limit by construction
    pub async fn history_for(&self, requester: &Requester) -> Result<Vec<UploadSummary>> {
        self.db.history(&requester.user_id).await
    }

    /// Delete one upload (cascading its readings), subject to the same
    /// ownership rule as every other call
    pub async fn delete(&self, upload_id: i64, requester: &Requester) -> Result<()> {
        self.db.delete_upload(upload_id, requester).await
    }

    /// Renderer-ready report for one upload (or the most recent one)
    pub async fn report_for(
        &self,
        upload_id: Option<i64>,
        requester: &Requester,
    ) -> Result<ReportModel> {
        let upload = self
            .resolve_upload(upload_id, requester)
            .await?
            .ok_or_else(|| Error::validation("no uploads available to report on"))?;

        let readings = self.db.readings_for_upload(upload.id).await?;
        let aggregation = self.aggregator.aggregate(&readings);
        Ok(report::assemble(&aggregation, &upload))
    }

    /// Resolve the referenced upload and enforce ownership.
    ///
    /// `Ok(None)` means "requester has no uploads" and only occurs when no
    /// explicit id was given.
    async fn resolve_upload(
        &self,
        upload_id: Option<i64>,
        requester: &Requester,
    ) -> Result<Option<Upload>> {
        match upload_id {
            Some(id) => {
                let upload = self.db.upload(id).await?.ok_or(Error::UploadAccess)?;
                if !requester.can_access(&upload.owner_id) {
                    return Err(Error::UploadAccess);
                }
                Ok(Some(upload))
            }
            None => self.db.latest_upload(&requester.user_id).await,
        }
    }
}
