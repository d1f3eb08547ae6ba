//! Save report
//!
//! Per-operation outcome record for a save attempt. Partial success is
//! a normal, expected result: the host UI renders one line per
//! attempted operation, never a single pass/fail flag.

use serde::Serialize;

/// One persistence operation the orchestrator attempted (or skipped
/// with a recorded reason)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveOp {
    Avatar,
    HeroAbout,
    ShopInfo,
    UpdateProduct { id: String, name: String },
    DeleteProduct { id: String },
    UpdateEvent { id: String, name: String },
    DeleteEvent { id: String },
}

impl SaveOp {
    /// Human-readable subject for outcome lines
    pub fn label(&self) -> String {
        match self {
            SaveOp::Avatar => "shop logo".to_string(),
            SaveOp::HeroAbout => "hero/about section".to_string(),
            SaveOp::ShopInfo => "shop info".to_string(),
            SaveOp::UpdateProduct { name, .. } => format!("product \"{}\"", name),
            SaveOp::DeleteProduct { id } => format!("product {}", id),
            SaveOp::UpdateEvent { name, .. } => format!("event \"{}\"", name),
            SaveOp::DeleteEvent { id } => format!("event {}", id),
        }
    }

    fn success_verb(&self) -> &'static str {
        match self {
            SaveOp::DeleteProduct { .. } | SaveOp::DeleteEvent { .. } => "deleted",
            _ => "updated",
        }
    }
}

/// Why an operation failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Draft had no display name; skipped without a request
    MissingName,
    /// The server call failed (network, 5xx, server-side validation)
    Api(String),
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureKind::MissingName => write!(f, "missing display name"),
            FailureKind::Api(reason) => write!(f, "{}", reason),
        }
    }
}

/// Outcome of one operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OpOutcome {
    Succeeded,
    Failed(FailureKind),
}

/// One line of the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveEntry {
    pub op: SaveOp,
    pub outcome: OpOutcome,
}

impl std::fmt::Display for SaveEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.outcome {
            OpOutcome::Succeeded => {
                write!(f, "{} {}", self.op.label(), self.op.success_verb())
            }
            OpOutcome::Failed(kind) => write!(f, "{} failed: {}", self.op.label(), kind),
        }
    }
}

/// Aggregate result of one save attempt, in operation order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SaveReport {
    entries: Vec<SaveEntry>,
}

impl SaveReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_ok(&mut self, op: SaveOp) {
        self.entries.push(SaveEntry {
            op,
            outcome: OpOutcome::Succeeded,
        });
    }

    pub(crate) fn push_failed(&mut self, op: SaveOp, kind: FailureKind) {
        self.entries.push(SaveEntry {
            op,
            outcome: OpOutcome::Failed(kind),
        });
    }

    pub fn entries(&self) -> &[SaveEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when every attempted operation succeeded
    pub fn all_succeeded(&self) -> bool {
        self.entries
            .iter()
            .all(|e| matches!(e.outcome, OpOutcome::Succeeded))
    }

    /// The failed entries, in operation order
    pub fn failures(&self) -> impl Iterator<Item = &SaveEntry> {
        self.entries
            .iter()
            .filter(|e| !matches!(e.outcome, OpOutcome::Succeeded))
    }
}
