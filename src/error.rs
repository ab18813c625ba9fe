use std::path::PathBuf;

/// Errors raised while building or driving a `Network`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NetworkError {
    #[error("weight matrix must be {expected:?} (rows, cols), got {found:?}")]
    WeightShape {
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("bias vector must have length {expected}, got {found}")]
    BiasLength { expected: usize, found: usize },

    #[error("input vector must have length {expected}, got {found}")]
    InputLength { expected: usize, found: usize },

    #[error("target vector must have length {expected}, got {found}")]
    TargetLength { expected: usize, found: usize },

    #[error("layers must contain at least one neuron")]
    ZeroSizedLayer,
}

/// Errors raised while loading or validating engine configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("difficulty must be in 1..=10, got {0}")]
    Difficulty(u8),

    #[error("the human player must be X or O, not Empty")]
    HumanSymbol,

    #[error("config validation error: {0}")]
    Validation(String),

    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Network(#[from] NetworkError),
}

/// Reasons a move is rejected. Rejected moves never touch the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("cell ({row}, {column}) is off the board")]
    OutOfBounds { row: usize, column: usize },

    #[error("cell ({row}, {column}) is already taken")]
    Occupied { row: usize, column: usize },

    #[error("the game is already over")]
    GameOver,
}

/// Reasons a match stops before reaching a result.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlayError {
    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error("computer chose an illegal move at ({row}, {column})")]
    IllegalComputerMove {
        row: usize,
        column: usize,
        source: MoveError,
    },
}

/// Errors from parsing a board written as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BoardParseError {
    #[error("expected 9 cells, found {0}")]
    CellCount(usize),

    #[error("unexpected character {0:?}")]
    InvalidChar(char),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_error_display() {
        let err = NetworkError::WeightShape {
            expected: (2, 3),
            found: (3, 2),
        };
        assert_eq!(
            err.to_string(),
            "weight matrix must be (2, 3) (rows, cols), got (3, 2)"
        );
    }

    #[test]
    fn test_config_error_display() {
        assert_eq!(
            ConfigError::Difficulty(11).to_string(),
            "difficulty must be in 1..=10, got 11"
        );
    }

    #[test]
    fn test_move_error_display() {
        let err = MoveError::Occupied { row: 1, column: 2 };
        assert_eq!(err.to_string(), "cell (1, 2) is already taken");
    }

    #[test]
    fn test_play_error_keeps_move_error_as_source() {
        use std::error::Error;

        let err = PlayError::IllegalComputerMove {
            row: 0,
            column: 0,
            source: MoveError::Occupied { row: 0, column: 0 },
        };
        assert_eq!(err.to_string(), "computer chose an illegal move at (0, 0)");
        assert_eq!(
            err.source().map(|s| s.to_string()),
            Some("cell (0, 0) is already taken".to_string())
        );
    }
}
