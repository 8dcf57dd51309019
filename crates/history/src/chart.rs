use crate::export::CsvRecord;

/// One labelled point handed to a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    /// 1-based position within the filtered view, e.g. `"Pt 3"`.
    pub label: String,
    /// Sample value rounded to two decimals for display.
    pub value: f64,
}

/// Label a filtered series for plotting.
pub fn format_series(samples: &[f64]) -> Vec<ChartPoint> {
    samples
        .iter()
        .enumerate()
        .map(|(i, &v)| ChartPoint {
            label: format!("Pt {}", i + 1),
            value: round2(v),
        })
        .collect()
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

impl CsvRecord for ChartPoint {
    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![("label", self.label.clone()), ("value", self.value.to_string())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_one_based_and_ordered() {
        let points = format_series(&[3.0, 1.0, 2.0]);
        let labels: Vec<_> = points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, ["Pt 1", "Pt 2", "Pt 3"]);
        assert_eq!(points[1].value, 1.0);
    }

    #[test]
    fn values_rounded_for_display_only() {
        let samples = [12.3456, 99.999];
        let points  = format_series(&samples);
        assert_eq!(points[0].value, 12.35);
        assert_eq!(points[1].value, 100.0);
        assert_eq!(samples[0], 12.3456);
    }

    #[test]
    fn empty_in_empty_out() {
        assert!(format_series(&[]).is_empty());
    }
}
