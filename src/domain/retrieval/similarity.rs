use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::embedding::{cosine_similarity, dot_product};

/// Scoring function used to rank stored embeddings against a query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Similarity {
    #[default]
    DotProduct,
    Cosine,
}

impl Similarity {
    pub fn score(&self, query: &[f32], candidate: &[f32]) -> f32 {
        match self {
            Similarity::DotProduct => dot_product(query, candidate),
            Similarity::Cosine => cosine_similarity(query, candidate),
        }
    }
}

impl fmt::Display for Similarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Similarity::DotProduct => write!(f, "dot_product"),
            Similarity::Cosine => write!(f, "cosine"),
        }
    }
}
