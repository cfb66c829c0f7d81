use serde::Serialize;

/// JSON response for `vaultkeep get --json`.
#[derive(Serialize)]
pub struct GetResponse {
    pub name: String,
    pub value: String,
}

/// JSON response for `vaultkeep list --json`.
#[derive(Serialize)]
pub struct ListResponse {
    pub secrets: Vec<String>,
}

/// JSON response for `vaultkeep history --json`.
#[derive(Serialize)]
pub struct HistoryResponse {
    pub name: String,
    pub records: Vec<HistoryItem>,
}

#[derive(Serialize)]
pub struct HistoryItem {
    pub index: usize,
    pub time: String,
    pub current: bool,
}

/// JSON response for write commands (`add`, `update`, `delete`, `passwd`).
#[derive(Serialize)]
pub struct WriteResponse {
    pub operation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records: Option<usize>,
}

/// JSON response for `vaultkeep audit show --json`.
#[derive(Serialize)]
pub struct AuditShowResponse {
    pub entries: Vec<AuditEntryItem>,
    pub shown: usize,
    pub total: usize,
}

#[derive(Serialize)]
pub struct AuditEntryItem {
    pub timestamp: String,
    pub operation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    pub actor: String,
    pub outcome: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// JSON response for `vaultkeep audit verify --json`.
#[derive(Serialize)]
pub struct AuditVerifyResponse {
    pub total: usize,
    pub verified: usize,
    pub intact: bool,
}
