//! Label capability.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use super::{issue_path, require_non_empty};
use crate::composition::{Capability, CapabilityDescriptor};
use crate::connector::{execute, fetch, ApiRequest, Connector};
use crate::error::Result;
use crate::models::Label;
use crate::traits::ManagesIssueLabels;

/// Methods contributed by [`LabelsCapability`].
pub const LABELS: CapabilityDescriptor = CapabilityDescriptor {
    name: "labels",
    methods: &[
        "add_label",
        "add_labels",
        "replace_all_labels",
        "list_labels",
        "remove_label",
        "remove_all_labels",
    ],
};

/// [`ManagesIssueLabels`] over a shared connector.
pub struct LabelsCapability<C: ?Sized> {
    connector: Arc<C>,
}

impl<C: ?Sized> Clone for LabelsCapability<C> {
    fn clone(&self) -> Self {
        Self {
            connector: Arc::clone(&self.connector),
        }
    }
}

impl<C: ?Sized> std::fmt::Debug for LabelsCapability<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelsCapability").finish_non_exhaustive()
    }
}

impl<C: Connector + ?Sized> Capability for LabelsCapability<C> {
    type Connector = C;
    const DESCRIPTOR: CapabilityDescriptor = LABELS;

    fn attach(connector: Arc<C>) -> Self {
        Self { connector }
    }

    fn connector(&self) -> &Arc<C> {
        &self.connector
    }
}

fn labels_path(owner: &str, repo: &str, number: u64) -> Result<String> {
    Ok(format!("{}/labels", issue_path(owner, repo, number)?))
}

#[async_trait]
impl<C: Connector + ?Sized> ManagesIssueLabels for LabelsCapability<C> {
    #[tracing::instrument(skip(self))]
    async fn add_label(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        label: &str,
    ) -> Result<Vec<Label>> {
        require_non_empty("label", label)?;
        let path = labels_path(owner, repo, number)?;
        fetch(
            self.connector.as_ref(),
            ApiRequest::post(path, json!({ "labels": [label] })),
        )
        .await
    }

    #[tracing::instrument(skip(self))]
    async fn add_labels(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        labels: &[String],
    ) -> Result<Vec<Label>> {
        let path = labels_path(owner, repo, number)?;
        fetch(
            self.connector.as_ref(),
            ApiRequest::post(path, json!({ "labels": labels })),
        )
        .await
    }

    #[tracing::instrument(skip(self))]
    async fn replace_all_labels(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        labels: &[String],
    ) -> Result<Vec<Label>> {
        let path = labels_path(owner, repo, number)?;
        fetch(
            self.connector.as_ref(),
            ApiRequest::put(path, json!({ "labels": labels })),
        )
        .await
    }

    #[tracing::instrument(skip(self))]
    async fn list_labels(&self, owner: &str, repo: &str, number: u64) -> Result<Vec<Label>> {
        let path = labels_path(owner, repo, number)?;
        fetch(self.connector.as_ref(), ApiRequest::get(path)).await
    }

    #[tracing::instrument(skip(self))]
    async fn remove_label(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        label: &str,
    ) -> Result<Vec<Label>> {
        require_non_empty("label", label)?;
        let path = format!(
            "{}/{}",
            labels_path(owner, repo, number)?,
            urlencoding::encode(label)
        );
        fetch(self.connector.as_ref(), ApiRequest::delete(path)).await
    }

    #[tracing::instrument(skip(self))]
    async fn remove_all_labels(&self, owner: &str, repo: &str, number: u64) -> Result<()> {
        let path = labels_path(owner, repo, number)?;
        execute(self.connector.as_ref(), ApiRequest::delete(path)).await
    }
}
