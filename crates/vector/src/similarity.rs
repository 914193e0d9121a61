//! Pure similarity ranking over decoded records
//!
//! Kept free of storage concerns so the ranking math is testable without a
//! live backing table.

use std::cmp::Ordering;

use crate::types::{Document, VectorRecord};

/// Cosine similarity between two equal-length vectors.
///
/// A zero-magnitude input on either side scores 0.0; the function never
/// divides by zero and never returns NaN for finite inputs.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Outcome of ranking a scan against a query
#[derive(Debug, Clone)]
pub struct Ranking {
    /// Top-k documents with scores, best first
    pub hits: Vec<(Document, f32)>,

    /// Records skipped because their dimensionality differed from the query
    pub skipped_dimension: usize,
}

/// Score every record against the query and keep the best `k`.
///
/// Records whose dimensionality differs from the query are skipped and
/// counted rather than failing the ranking. The sort is stable, so equal
/// scores keep their scan order. `k == 0` yields no hits; `k` beyond the
/// number of scorable records yields all of them.
pub fn rank_top_k(query: &[f32], records: &[VectorRecord], k: usize) -> Ranking {
    let mut skipped_dimension = 0;
    let mut scored: Vec<(Document, f32)> = Vec::new();

    for record in records {
        if record.vector.len() != query.len() {
            skipped_dimension += 1;
            continue;
        }

        let score = cosine_similarity(query, &record.vector);
        scored.push((
            Document {
                content: record.content.clone(),
                metadata: record.metadata.clone(),
            },
            score,
        ));
    }

    // Stable sort keeps scan order for equal scores
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    scored.truncate(k);

    Ranking {
        hits: scored,
        skipped_dimension,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f32 = 1e-6;

    fn record(content: &str, vector: Vec<f32>) -> VectorRecord {
        VectorRecord::new(content, vector)
    }

    #[test]
    fn test_self_similarity_is_one() {
        let v = vec![0.3, -1.2, 4.5, 0.01];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_zero_vector_scores_zero() {
        let v = vec![1.0, 2.0];
        let zero = vec![0.0, 0.0];
        assert_eq!(cosine_similarity(&v, &zero), 0.0);
        assert_eq!(cosine_similarity(&zero, &v), 0.0);
        assert_eq!(cosine_similarity(&zero, &zero), 0.0);
    }

    #[test]
    fn test_orthogonal_and_opposite() {
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < TOLERANCE);
        assert!((cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]) + 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_rank_k_zero_is_empty() {
        let records = vec![record("a", vec![1.0, 0.0])];
        let ranking = rank_top_k(&[1.0, 0.0], &records, 0);
        assert!(ranking.hits.is_empty());
    }

    #[test]
    fn test_rank_k_beyond_count_returns_all_sorted() {
        let records = vec![
            record("far", vec![0.0, 1.0]),
            record("near", vec![1.0, 0.1]),
            record("exact", vec![2.0, 0.0]),
        ];
        let ranking = rank_top_k(&[1.0, 0.0], &records, 10);

        assert_eq!(ranking.hits.len(), 3);
        assert_eq!(ranking.hits[0].0.content, "exact");
        assert_eq!(ranking.hits[1].0.content, "near");
        assert_eq!(ranking.hits[2].0.content, "far");
        assert!(ranking
            .hits
            .windows(2)
            .all(|pair| pair[0].1 >= pair[1].1));
    }

    #[test]
    fn test_equal_scores_keep_scan_order() {
        // Same direction, different magnitude: identical cosine scores
        let records = vec![
            record("first", vec![1.0, 1.0]),
            record("second", vec![2.0, 2.0]),
            record("third", vec![3.0, 3.0]),
        ];
        let ranking = rank_top_k(&[1.0, 1.0], &records, 3);

        let order: Vec<&str> = ranking.hits.iter().map(|(d, _)| d.content.as_str()).collect();
        assert_eq!(order, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_dimension_mismatch_skipped_and_counted() {
        let records = vec![
            record("short", vec![1.0, 0.0]),
            record("fits", vec![1.0, 0.0, 0.0]),
        ];
        let ranking = rank_top_k(&[1.0, 0.0, 0.0], &records, 5);

        assert_eq!(ranking.hits.len(), 1);
        assert_eq!(ranking.hits[0].0.content, "fits");
        assert_eq!(ranking.skipped_dimension, 1);
    }

    #[test]
    fn test_empty_input_is_empty() {
        let ranking = rank_top_k(&[1.0], &[], 5);
        assert!(ranking.hits.is_empty());
        assert_eq!(ranking.skipped_dimension, 0);
    }
}
