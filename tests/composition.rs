//! Building custom composites from capability units.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ghissues::capabilities::{IssuesCapability, LabelsCapability, ISSUES, LABELS};
use ghissues::composition::{
    descriptors_disjoint, Capability, CapabilityDescriptor, Composition, Manifest,
};
use ghissues::{
    assert_disjoint_capabilities, ApiRequest, Connector, Error, Issue, IssueListQuery,
    IssueUpdate, Label, ManagesIssueLabels, ManagesIssues, NewIssue,
};
use reqwest::Method;
use serde_json::{json, Value};

/// Connector that records requests and answers with a canned issue.
#[derive(Default)]
struct Recorder {
    seen: Mutex<Vec<(Method, String)>>,
}

#[async_trait]
impl Connector for Recorder {
    async fn send(&self, request: ApiRequest) -> ghissues::Result<Value> {
        self.seen
            .lock()
            .unwrap()
            .push((request.method.clone(), request.path.clone()));
        if request.path.ends_with("/labels") {
            return Ok(json!([{"name": "triaged"}]));
        }
        Ok(json!({"number": 5, "title": "Stale", "state": "closed"}))
    }
}

/// A two-capability composite: issues and labels, no assignees.
struct TriageBoard<C: ?Sized> {
    issues: IssuesCapability<C>,
    labels: LabelsCapability<C>,
    manifest: Manifest,
}

assert_disjoint_capabilities!(ISSUES, LABELS);

impl<C: Connector + ?Sized> TriageBoard<C> {
    fn new(connector: Arc<C>) -> ghissues::Result<Self> {
        Ok(Self {
            manifest: Manifest::compose(&[ISSUES, LABELS])?,
            issues: IssuesCapability::attach(Arc::clone(&connector)),
            labels: LabelsCapability::attach(connector),
        })
    }
}

#[async_trait]
impl<C: Connector + ?Sized> ManagesIssues for TriageBoard<C> {
    async fn get_issue(&self, owner: &str, repo: &str, number: u64) -> ghissues::Result<Issue> {
        self.issues.get_issue(owner, repo, number).await
    }

    async fn close_issue(&self, owner: &str, repo: &str, number: u64) -> ghissues::Result<Issue> {
        self.issues.close_issue(owner, repo, number).await
    }

    async fn reopen_issue(&self, owner: &str, repo: &str, number: u64) -> ghissues::Result<Issue> {
        self.issues.reopen_issue(owner, repo, number).await
    }

    async fn list_issues(
        &self,
        owner: &str,
        repo: &str,
        query: &IssueListQuery,
    ) -> ghissues::Result<Vec<Issue>> {
        self.issues.list_issues(owner, repo, query).await
    }

    async fn create_issue(
        &self,
        owner: &str,
        repo: &str,
        issue: &NewIssue,
    ) -> ghissues::Result<Issue> {
        self.issues.create_issue(owner, repo, issue).await
    }

    async fn update_issue(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        update: &IssueUpdate,
    ) -> ghissues::Result<Issue> {
        self.issues.update_issue(owner, repo, number, update).await
    }
}

#[async_trait]
impl<C: Connector + ?Sized> ManagesIssueLabels for TriageBoard<C> {
    async fn add_label(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        label: &str,
    ) -> ghissues::Result<Vec<Label>> {
        self.labels.add_label(owner, repo, number, label).await
    }

    async fn add_labels(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        labels: &[String],
    ) -> ghissues::Result<Vec<Label>> {
        self.labels.add_labels(owner, repo, number, labels).await
    }

    async fn replace_all_labels(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        labels: &[String],
    ) -> ghissues::Result<Vec<Label>> {
        self.labels.replace_all_labels(owner, repo, number, labels).await
    }

    async fn list_labels(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> ghissues::Result<Vec<Label>> {
        self.labels.list_labels(owner, repo, number).await
    }

    async fn remove_label(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        label: &str,
    ) -> ghissues::Result<Vec<Label>> {
        self.labels.remove_label(owner, repo, number, label).await
    }

    async fn remove_all_labels(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> ghissues::Result<()> {
        self.labels.remove_all_labels(owner, repo, number).await
    }
}

/// A third-party capability that also claims `add_label`.
const TAGGING: CapabilityDescriptor = CapabilityDescriptor {
    name: "tagging",
    methods: &["add_label", "add_tag"],
};

#[tokio::test]
async fn test_custom_composite_shares_one_connector() {
    let recorder = Arc::new(Recorder::default());
    let board = TriageBoard::new(Arc::clone(&recorder)).unwrap();

    assert!(Arc::ptr_eq(board.issues.connector(), board.labels.connector()));
    assert!(Arc::ptr_eq(board.issues.connector(), &recorder));

    board.close_issue("acme", "app", 5).await.unwrap();
    board
        .replace_all_labels("acme", "app", 5, &["triaged".to_string()])
        .await
        .unwrap();

    let seen = recorder.seen.lock().unwrap().clone();
    assert_eq!(
        seen,
        vec![
            (Method::PATCH, "repos/acme/app/issues/5".to_string()),
            (Method::PUT, "repos/acme/app/issues/5/labels".to_string()),
        ]
    );
}

#[test]
fn test_custom_composite_exposes_exact_union() {
    let board = TriageBoard::new(Arc::new(Recorder::default())).unwrap();

    assert_eq!(board.manifest.capabilities(), &["issues", "labels"]);
    assert_eq!(
        board.manifest.len(),
        ISSUES.methods.len() + LABELS.methods.len()
    );
    assert!(board.manifest.provides("close_issue"));
    assert!(board.manifest.provides("remove_all_labels"));
    assert!(!board.manifest.provides("assign_issue"));
}

#[test]
fn test_conflicting_capability_fails_at_construction() {
    let err = Manifest::compose(&[ISSUES, LABELS, TAGGING]).unwrap_err();

    match err {
        Error::ConstructionConflict {
            method,
            first,
            second,
        } => {
            assert_eq!(method, "add_label");
            assert_eq!(first, "labels");
            assert_eq!(second, "tagging");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    assert!(!descriptors_disjoint(&[LABELS, TAGGING]));
    assert!(descriptors_disjoint(&[ISSUES, TAGGING]));
}

#[test]
fn test_incorporating_same_capability_twice_is_harmless() {
    let manifest = Composition::new()
        .incorporate(LABELS)
        .and_then(|c| c.incorporate(LABELS))
        .unwrap()
        .build();

    assert_eq!(manifest.capabilities(), &["labels"]);
    assert_eq!(manifest.len(), LABELS.methods.len());
}
