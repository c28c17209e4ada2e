//! Document and OCR job repository.

use chrono::Utc;
use ridgeline_core::documents::{
    DocumentCategory, DocumentError, NewDocument, OcrJobService, OcrJobStatus, OcrOutcome,
};
use ridgeline_core::validation::{ListQuery, Unfiltered};
use ridgeline_shared::types::PageResponse;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use super::support::{decode, fetch_page, search_condition};
use crate::entities::{documents, ocr_jobs};

fn db_err(e: DbErr) -> DocumentError {
    DocumentError::Database(e.to_string())
}

/// A document with its OCR jobs, newest first.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDetail {
    /// Metadata.
    #[serde(flatten)]
    pub document: documents::Model,
    /// OCR runs.
    pub ocr_jobs: Vec<ocr_jobs::Model>,
}

/// Document persistence.
#[derive(Debug, Clone)]
pub struct DocumentRepository {
    db: DatabaseConnection,
}

impl DocumentRepository {
    /// Creates a new document repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers document metadata and queues an OCR job for it.
    pub async fn register(
        &self,
        uploaded_by: Uuid,
        input: NewDocument,
    ) -> Result<DocumentDetail, DocumentError> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let now = Utc::now().into();
        let document = documents::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(input.title),
            category: Set(input.category.as_str().to_string()),
            file_url: Set(input.file_url),
            mime_type: Set(input.mime_type),
            size_bytes: Set(input.size_bytes.map(i64::from)),
            uploaded_by: Set(uploaded_by),
            created_at: Set(now),
        }
        .insert(&txn)
        .await
        .map_err(db_err)?;

        let job = new_job(document.id).insert(&txn).await.map_err(db_err)?;
        txn.commit().await.map_err(db_err)?;

        info!(document_id = %document.id, ocr_job_id = %job.id, "Document registered");
        Ok(DocumentDetail {
            document,
            ocr_jobs: vec![job],
        })
    }

    /// Lists documents by category.
    pub async fn list(
        &self,
        query: &ListQuery<Unfiltered, DocumentCategory>,
        caller: Uuid,
    ) -> Result<PageResponse<documents::Model>, DocumentError> {
        let mut select = documents::Entity::find().order_by_desc(documents::Column::CreatedAt);
        if let Some(category) = query.kind {
            select = select.filter(documents::Column::Category.eq(category.as_str()));
        }
        if query.only_mine() {
            select = select.filter(documents::Column::UploadedBy.eq(caller));
        }
        if let Some(term) = &query.search {
            select = select.filter(search_condition(&[documents::Column::Title], term));
        }
        fetch_page(&self.db, select, query.page).await.map_err(db_err)
    }

    /// Fetches a document with its OCR jobs.
    pub async fn get(&self, id: Uuid) -> Result<DocumentDetail, DocumentError> {
        let document = documents::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or(DocumentError::DocumentNotFound(id))?;
        let ocr_jobs = ocr_jobs::Entity::find()
            .filter(ocr_jobs::Column::DocumentId.eq(id))
            .order_by_desc(ocr_jobs::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(DocumentDetail { document, ocr_jobs })
    }

    /// Queues another OCR run for an existing document.
    pub async fn requeue(&self, document_id: Uuid) -> Result<ocr_jobs::Model, DocumentError> {
        documents::Entity::find_by_id(document_id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or(DocumentError::DocumentNotFound(document_id))?;
        let job = new_job(document_id).insert(&self.db).await.map_err(db_err)?;

        info!(document_id = %document_id, ocr_job_id = %job.id, "OCR job queued");
        Ok(job)
    }

    /// Lists OCR jobs, oldest first, so a worker can drain the queue.
    pub async fn list_jobs(
        &self,
        query: &ListQuery<OcrJobStatus>,
    ) -> Result<PageResponse<ocr_jobs::Model>, DocumentError> {
        let mut select = ocr_jobs::Entity::find().order_by_asc(ocr_jobs::Column::CreatedAt);
        if let Some(status) = query.status {
            select = select.filter(ocr_jobs::Column::Status.eq(status.as_str()));
        }
        fetch_page(&self.db, select, query.page).await.map_err(db_err)
    }

    /// Queued → Processing.
    pub async fn start_job(&self, id: Uuid) -> Result<ocr_jobs::Model, DocumentError> {
        let job = find_job(&self.db, id, false).await?;
        let next = OcrJobService::start(status_of(&job)?)?;

        let now = Utc::now().into();
        let mut active: ocr_jobs::ActiveModel = job.into();
        active.status = Set(next.as_str().to_string());
        active.started_at = Set(Some(now));
        active.updated_at = Set(now);
        let updated = active.update(&self.db).await.map_err(db_err)?;

        info!(ocr_job_id = %id, "OCR job started");
        Ok(updated)
    }

    /// Records the OCR result. A job finishes exactly once.
    pub async fn finish_job(
        &self,
        id: Uuid,
        outcome: &OcrOutcome,
    ) -> Result<ocr_jobs::Model, DocumentError> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let job = find_job(&txn, id, true).await?;
        let next = OcrJobService::finish(status_of(&job)?, outcome)?;

        let now = Utc::now().into();
        let mut active: ocr_jobs::ActiveModel = job.into();
        active.status = Set(next.as_str().to_string());
        match outcome {
            OcrOutcome::Completed {
                extracted_text,
                confidence,
            } => {
                active.extracted_text = Set(Some(extracted_text.clone()));
                active.confidence = Set(Some(*confidence));
                active.error_message = Set(None);
            }
            OcrOutcome::Failed { error_message } => {
                active.error_message = Set(Some(error_message.clone()));
            }
        }
        active.completed_at = Set(Some(now));
        active.updated_at = Set(now);
        let updated = active.update(&txn).await.map_err(db_err)?;
        txn.commit().await.map_err(db_err)?;

        info!(ocr_job_id = %id, document_id = %updated.document_id, status = %next, "OCR job finished");
        Ok(updated)
    }
}

fn new_job(document_id: Uuid) -> ocr_jobs::ActiveModel {
    let now = Utc::now().into();
    ocr_jobs::ActiveModel {
        id: Set(Uuid::new_v4()),
        document_id: Set(document_id),
        status: Set(OcrJobStatus::Queued.as_str().to_string()),
        extracted_text: Set(None),
        confidence: Set(None),
        error_message: Set(None),
        started_at: Set(None),
        completed_at: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

async fn find_job<C: sea_orm::ConnectionTrait>(
    conn: &C,
    id: Uuid,
    lock: bool,
) -> Result<ocr_jobs::Model, DocumentError> {
    let mut select = ocr_jobs::Entity::find_by_id(id);
    if lock {
        select = select.lock_exclusive();
    }
    select
        .one(conn)
        .await
        .map_err(db_err)?
        .ok_or(DocumentError::JobNotFound(id))
}

fn status_of(job: &ocr_jobs::Model) -> Result<OcrJobStatus, DocumentError> {
    decode(&job.status).map_err(|e| DocumentError::Database(e.to_string()))
}
