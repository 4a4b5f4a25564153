// Messages exchanged between the TUI and the app orchestrator.
//
// The TUI sends `UserCommand`s; the orchestrator performs the API calls and
// answers with `UiUpdate`s.

use ranking_core::model::{
    AttributeValueInput, Comparison, ComparisonSummary, NewAttribute, NewComparison,
    ProductUpdate, RankingResults, SortState,
};

/// The four screens of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    CreateComparison,
    ComparisonDetail(i64),
    RankingResults(i64),
}

/// Whether the backend answered the most recent request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    /// No request has completed yet.
    Unknown,
    Connected,
    Unreachable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// A transient notification.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    /// Underlying error text, shown under the message.
    pub detail: Option<String>,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Toast {
            kind: ToastKind::Success,
            message: message.into(),
            detail: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Toast {
            kind: ToastKind::Error,
            message: message.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            ToastKind::Success => "Success",
            ToastKind::Error => "Error",
        }
    }
}

/// Commands from the TUI to the app orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub enum UserCommand {
    LoadComparisons,
    DeleteComparison {
        id: i64,
    },
    /// Create the comparison, then each attribute in order.
    CreateComparison {
        comparison: NewComparison,
        attributes: Vec<NewAttribute>,
    },
    LoadComparison {
        id: i64,
    },
    /// Create (`product_id == None`) or update a product.
    SaveProduct {
        comparison_id: i64,
        product_id: Option<i64>,
        fields: ProductUpdate,
        attribute_data: Vec<AttributeValueInput>,
    },
    DeleteProduct {
        comparison_id: i64,
        product_id: i64,
    },
    LoadRanking {
        comparison_id: i64,
        sort: SortState,
    },
    Quit,
}

/// Updates pushed from the app orchestrator to the TUI.
#[derive(Debug, Clone, PartialEq)]
pub enum UiUpdate {
    ComparisonsLoaded(Vec<ComparisonSummary>),
    /// A comparison was deleted; drop it from the list without refetching.
    ComparisonRemoved(i64),
    ComparisonLoaded(Box<Comparison>),
    RankingLoaded(Box<RankingResults>),
    /// The product form's save succeeded; close it.
    ProductSaved,
    Navigate(Screen),
    Toast(Toast),
    /// A request is in flight (`true`) or finished (`false`).
    Busy(bool),
    ConnectionStatus(ConnectionStatus),
}
