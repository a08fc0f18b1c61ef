//! Error types for pour problem extraction.

use thiserror::Error;

/// Result type for pour operations.
pub type PourResult<T> = Result<T, PourError>;

/// Errors that abort a conversion.
///
/// Per-element problems (unconnected pads, unsupported shapes, short trace
/// runs) are never errors; they are handled while extracting.
#[derive(Debug, Error)]
pub enum PourError {
    /// The circuit has no `pcb_board` element.
    #[error("No pcb_board found in circuit")]
    NoBoard,

    /// The board has no outline and no width/height to fall back on.
    #[error("Board '{board_id}' has no outline and no width/height")]
    MissingBoardDimensions {
        /// Board id.
        board_id: String,
    },

    /// No `source_net` with the requested name exists.
    #[error("Net with name \"{net_name}\" not found")]
    NetNotFound {
        /// Requested net name.
        net_name: String,
    },

    /// The net exists but has no connectivity key.
    #[error("Net \"{net_name}\" has no connectivity mapping")]
    NetNotConnected {
        /// Requested net name.
        net_name: String,
    },
}

impl PourError {
    /// Creates a missing board dimensions error.
    pub fn missing_board_dimensions(board_id: impl Into<String>) -> Self {
        Self::MissingBoardDimensions {
            board_id: board_id.into(),
        }
    }

    /// Creates a net not found error.
    pub fn net_not_found(net_name: impl Into<String>) -> Self {
        Self::NetNotFound {
            net_name: net_name.into(),
        }
    }

    /// Creates a net not connected error.
    pub fn net_not_connected(net_name: impl Into<String>) -> Self {
        Self::NetNotConnected {
            net_name: net_name.into(),
        }
    }
}
