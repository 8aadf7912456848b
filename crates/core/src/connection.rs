//! Connection-style paging for the read-only query surface.
//!
//! Pages are keyset-paginated on the primary key in ascending order.
//! Cursors and global ids are opaque URL-safe base64 strings:
//!
//! - cursor: `cursor:<id>`
//! - global id: `<TypeName>:<id>` (e.g. `DogListing:7`)

use base64::engine::general_purpose::URL_SAFE_NO_PAD as B64;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Page size used when neither `first` nor `last` is given.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Upper bound for `first` / `last`.
pub const MAX_PAGE_SIZE: i64 = 100;

const CURSOR_PREFIX: &str = "cursor:";

// ---------------------------------------------------------------------------
// Node types and global ids
// ---------------------------------------------------------------------------

/// Entity types reachable through global-id lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NodeType {
    DogListing,
    ContactRequest,
}

impl NodeType {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeType::DogListing => "DogListing",
            NodeType::ContactRequest => "ContactRequest",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "DogListing" => Some(NodeType::DogListing),
            "ContactRequest" => Some(NodeType::ContactRequest),
            _ => None,
        }
    }
}

/// A row that can be exposed as a connection node.
pub trait Node {
    const NODE_TYPE: NodeType;

    fn node_id(&self) -> DbId;
}

pub fn encode_global_id(node_type: NodeType, id: DbId) -> String {
    B64.encode(format!("{}:{id}", node_type.as_str()))
}

pub fn decode_global_id(global_id: &str) -> Result<(NodeType, DbId), CoreError> {
    let invalid = || CoreError::Validation(format!("Invalid global id '{global_id}'"));

    let raw = decode_text(global_id).ok_or_else(invalid)?;
    let (type_name, id) = raw.split_once(':').ok_or_else(invalid)?;
    let node_type = NodeType::parse(type_name).ok_or_else(invalid)?;
    let id: DbId = id.parse().map_err(|_| invalid())?;
    Ok((node_type, id))
}

pub fn encode_cursor(id: DbId) -> String {
    B64.encode(format!("{CURSOR_PREFIX}{id}"))
}

pub fn decode_cursor(cursor: &str) -> Result<DbId, CoreError> {
    let invalid = || CoreError::Validation(format!("Invalid cursor '{cursor}'"));

    decode_text(cursor)
        .as_deref()
        .and_then(|raw| raw.strip_prefix(CURSOR_PREFIX))
        .and_then(|id| id.parse().ok())
        .ok_or_else(invalid)
}

fn decode_text(encoded: &str) -> Option<String> {
    let bytes = B64.decode(encoded.as_bytes()).ok()?;
    String::from_utf8(bytes).ok()
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Raw connection arguments as received on the query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConnectionArgs {
    pub first: Option<i64>,
    pub after: Option<String>,
    pub last: Option<i64>,
    pub before: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Oldest rows first, starting after `after`.
    Forward,
    /// Newest rows first, starting before `before`; reversed before returning.
    Backward,
}

/// Validated paging window, ready for the repository layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub direction: Direction,
    pub limit: i64,
    pub after: Option<DbId>,
    pub before: Option<DbId>,
}

impl PageRequest {
    /// Rows the repository should fetch: one extra to detect another page.
    pub fn fetch_limit(&self) -> i64 {
        self.limit + 1
    }
}

impl ConnectionArgs {
    pub fn resolve(&self) -> Result<PageRequest, CoreError> {
        let (direction, requested) = match (self.first, self.last) {
            (Some(_), Some(_)) => {
                return Err(CoreError::Validation(
                    "Pass either 'first' or 'last', not both".into(),
                ))
            }
            (_, Some(last)) => (Direction::Backward, Some(last)),
            (first, None) => (Direction::Forward, first),
        };

        Ok(PageRequest {
            direction,
            limit: clamp_page_size(requested),
            after: self.after.as_deref().map(decode_cursor).transpose()?,
            before: self.before.as_deref().map(decode_cursor).transpose()?,
        })
    }
}

/// Clamp a user-provided page size to `1..=MAX_PAGE_SIZE`.
pub fn clamp_page_size(size: Option<i64>) -> i64 {
    size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// A node together with its global id.
#[derive(Debug, Serialize)]
pub struct GlobalNode<T: Serialize> {
    pub global_id: String,
    #[serde(flatten)]
    pub node: T,
}

impl<T: Node + Serialize> GlobalNode<T> {
    pub fn new(node: T) -> Self {
        Self {
            global_id: encode_global_id(T::NODE_TYPE, node.node_id()),
            node,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Edge<T: Serialize> {
    pub cursor: String,
    pub node: GlobalNode<T>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Connection<T: Serialize> {
    pub edges: Vec<Edge<T>>,
    pub page_info: PageInfo,
    pub total_count: i64,
}

impl<T: Node + Serialize> Connection<T> {
    /// Build a page from rows fetched with [`PageRequest::fetch_limit`].
    ///
    /// `rows` must be in fetch order: ascending ids for forward paging,
    /// descending ids for backward paging.
    pub fn from_rows(mut rows: Vec<T>, request: &PageRequest, total_count: i64) -> Self {
        let limit = usize::try_from(request.limit).unwrap_or(0);
        let has_more = rows.len() > limit;
        rows.truncate(limit);

        let (has_next_page, has_previous_page) = match request.direction {
            Direction::Forward => (has_more, request.after.is_some()),
            Direction::Backward => {
                rows.reverse();
                (request.before.is_some(), has_more)
            }
        };

        let edges: Vec<Edge<T>> = rows
            .into_iter()
            .map(|row| Edge {
                cursor: encode_cursor(row.node_id()),
                node: GlobalNode::new(row),
            })
            .collect();

        let page_info = PageInfo {
            has_next_page,
            has_previous_page,
            start_cursor: edges.first().map(|e| e.cursor.clone()),
            end_cursor: edges.last().map(|e| e.cursor.clone()),
        };

        Self {
            edges,
            page_info,
            total_count,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
