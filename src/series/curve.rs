//! Long-term regression curve

use serde::{Deserialize, Serialize};

use crate::snapshot::LongCurve;

/// One period of the long-term curve
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurvePoint {
    /// Period label, e.g. `"2025"`
    pub label: String,
    pub price: Option<f64>,
    /// Lower band
    pub low: Option<f64>,
    /// Upper band
    pub high: Option<f64>,
}

/// Zip the curve's parallel arrays into one sequence, driven by `labels`
///
/// Returns an empty sequence when the curve or its labels are absent.
/// Value arrays shorter than `labels` yield `None` at the missing indices;
/// extra trailing values are ignored.
pub fn zip_long_curve(curve: Option<&LongCurve>) -> Vec<CurvePoint> {
    let Some(curve) = curve else {
        return Vec::new();
    };
    let Some(labels) = curve.labels.as_ref() else {
        return Vec::new();
    };

    labels
        .iter()
        .enumerate()
        .map(|(i, label)| CurvePoint {
            label: label.clone(),
            price: value_at(&curve.pred_price, i),
            low: value_at(&curve.pred_price_low, i),
            high: value_at(&curve.pred_price_high, i),
        })
        .collect()
}

fn value_at(values: &[Option<f64>], i: usize) -> Option<f64> {
    values.get(i).copied().flatten()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve(labels: Option<&[&str]>, price: &[f64], low: &[f64], high: &[f64]) -> LongCurve {
        let wrap = |v: &[f64]| v.iter().copied().map(Some).collect::<Vec<_>>();
        LongCurve {
            labels: labels.map(|l| l.iter().map(|s| s.to_string()).collect()),
            pred_price: wrap(price),
            pred_price_low: wrap(low),
            pred_price_high: wrap(high),
        }
    }

    #[test]
    fn test_zip_matches_index_wise() {
        let input = curve(
            Some(&["2024", "2025"]),
            &[60000.0, 90000.0],
            &[50000.0, 80000.0],
            &[70000.0, 100000.0],
        );
        let points = zip_long_curve(Some(&input));

        assert_eq!(
            points,
            vec![
                CurvePoint {
                    label: "2024".into(),
                    price: Some(60000.0),
                    low: Some(50000.0),
                    high: Some(70000.0),
                },
                CurvePoint {
                    label: "2025".into(),
                    price: Some(90000.0),
                    low: Some(80000.0),
                    high: Some(100000.0),
                },
            ]
        );
    }

    #[test]
    fn test_missing_curve_or_labels_is_empty() {
        assert!(zip_long_curve(None).is_empty());

        let input = curve(None, &[1.0], &[1.0], &[1.0]);
        assert!(zip_long_curve(Some(&input)).is_empty());

        let input = curve(Some(&[]), &[1.0], &[1.0], &[1.0]);
        assert!(zip_long_curve(Some(&input)).is_empty());
    }

    #[test]
    fn test_short_value_arrays_propagate_as_missing() {
        let input = curve(Some(&["2024", "2025", "2026"]), &[1.0, 2.0, 3.0], &[0.5], &[]);
        let points = zip_long_curve(Some(&input));

        assert_eq!(points.len(), 3);
        assert_eq!(points[0].low, Some(0.5));
        assert_eq!(points[1].low, None);
        assert_eq!(points[2].price, Some(3.0));
        assert!(points.iter().all(|p| p.high.is_none()));
    }

    #[test]
    fn test_extra_values_are_ignored() {
        let input = curve(Some(&["2024"]), &[1.0, 2.0], &[0.5, 0.6], &[1.5, 1.6]);
        assert_eq!(zip_long_curve(Some(&input)).len(), 1);
    }
}
