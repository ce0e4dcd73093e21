// ABOUTME: Justified row packing for variable aspect ratio images.
// ABOUTME: Greedy single pass that fills each row to the container width at a shared height.

use gallery_core::{Artwork, DEFAULT_GAP};
use serde::Serialize;

/// Anything with an intrinsic width/height ratio can be packed
pub trait Aspect {
    fn aspect_ratio(&self) -> f64;
}

impl Aspect for f64 {
    fn aspect_ratio(&self) -> f64 {
        *self
    }
}

impl Aspect for Artwork {
    fn aspect_ratio(&self) -> f64 {
        Artwork::aspect_ratio(self)
    }
}

impl<T: Aspect + ?Sized> Aspect for &T {
    fn aspect_ratio(&self) -> f64 {
        (**self).aspect_ratio()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PackParams {
    pub container_width: f64,
    pub target_row_height: f64,
    pub gap: f64,
}

impl PackParams {
    /// Params with the standard 8px gap
    pub fn new(container_width: f64, target_row_height: f64) -> Self {
        Self {
            container_width,
            target_row_height,
            gap: DEFAULT_GAP,
        }
    }

    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    pub fn validate(&self) -> Result<(), PackError> {
        if !(self.container_width.is_finite() && self.container_width > 0.0) {
            return Err(PackError::InvalidContainerWidth(self.container_width));
        }
        if !(self.target_row_height.is_finite() && self.target_row_height > 0.0) {
            return Err(PackError::InvalidRowHeight(self.target_row_height));
        }
        if !(self.gap.is_finite() && self.gap >= 0.0) {
            return Err(PackError::InvalidGap(self.gap));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum PackError {
    #[error("Container width must be positive, got {0}")]
    InvalidContainerWidth(f64),

    #[error("Target row height must be positive, got {0}")]
    InvalidRowHeight(f64),

    #[error("Gap must be non-negative, got {0}")]
    InvalidGap(f64),

    #[error("Item {index} has invalid aspect ratio {value}")]
    InvalidAspectRatio { index: usize, value: f64 },

    #[error("Row {row} needs {gaps}px of gaps, which leaves no room in a {container_width}px container")]
    GapsExceedContainer {
        row: usize,
        gaps: f64,
        container_width: f64,
    },
}

/// An input item scaled to its row's height
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlacedItem {
    /// Position in the input sequence
    pub index: usize,
    pub aspect_ratio: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub height: f64,
    pub items: Vec<PlacedItem>,
}

impl Row {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Width taken by the items plus the gaps between them
    pub fn total_width(&self, gap: f64) -> f64 {
        let items: f64 = self.items.iter().map(|item| item.width).sum();
        items + gap * self.items.len().saturating_sub(1) as f64
    }

    /// Pair each placed item with the caller's original value
    pub fn resolve<'a, T>(
        &'a self,
        items: &'a [T],
    ) -> impl Iterator<Item = (&'a PlacedItem, &'a T)> + 'a {
        self.items
            .iter()
            .filter_map(move |placed| items.get(placed.index).map(|item| (placed, item)))
    }
}

/// Pack items into justified rows.
///
/// Items are appended to the current row until the row, scaled to the target
/// height, would reach the container width. The row is then scaled so it fills
/// the width exactly. The final row is capped at the target height instead of
/// being stretched, so it may end short of the container width.
///
/// Fails without returning any rows if a row's gaps alone use up the container
/// width, since no positive height could fill it.
pub fn pack<T: Aspect>(items: &[T], params: &PackParams) -> Result<Vec<Row>, PackError> {
    params.validate()?;

    let ratios = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let value = item.aspect_ratio();
            if value.is_finite() && value > 0.0 {
                Ok(value)
            } else {
                Err(PackError::InvalidAspectRatio { index, value })
            }
        })
        .collect::<Result<Vec<f64>, PackError>>()?;

    let PackParams {
        container_width,
        target_row_height,
        gap,
    } = *params;

    let mut rows = Vec::new();
    let mut current_row: Vec<(usize, f64)> = Vec::new();
    let mut row_aspect_sum = 0.0;
    let last = ratios.len().saturating_sub(1);

    for (index, &ratio) in ratios.iter().enumerate() {
        current_row.push((index, ratio));
        row_aspect_sum += ratio;

        let gaps = gap * (current_row.len() - 1) as f64;
        let width_at_target = row_aspect_sum * target_row_height + gaps;
        let is_last = index == last;
        if width_at_target < container_width && !is_last {
            continue;
        }

        let available = container_width - gaps;
        if available <= 0.0 {
            return Err(PackError::GapsExceedContainer {
                row: rows.len(),
                gaps,
                container_width,
            });
        }

        let row_height = available / row_aspect_sum;
        let height = if is_last {
            row_height.min(target_row_height)
        } else {
            row_height
        };

        tracing::trace!(
            "Closed row {} with {} items at {:.2}px",
            rows.len(),
            current_row.len(),
            height
        );

        rows.push(Row {
            height,
            items: current_row
                .drain(..)
                .map(|(index, aspect_ratio)| PlacedItem {
                    index,
                    aspect_ratio,
                    width: aspect_ratio * height,
                    height,
                })
                .collect(),
        });
        row_aspect_sum = 0.0;
    }

    tracing::debug!(
        "Packed {} items into {} rows ({}px wide, target {}px)",
        ratios.len(),
        rows.len(),
        container_width,
        target_row_height
    );

    Ok(rows)
}

/// Total stacked height of the rows with `gap` between consecutive rows
pub fn layout_height(rows: &[Row], gap: f64) -> f64 {
    let heights: f64 = rows.iter().map(|row| row.height).sum();
    heights + gap * rows.len().saturating_sub(1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-6;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    fn uniform(count: usize, ratio: f64) -> Vec<f64> {
        vec![ratio; count]
    }

    #[test]
    fn empty_input_gives_no_rows() {
        let rows = pack::<f64>(&[], &PackParams::new(1200.0, 260.0)).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn default_params_use_eight_pixel_gap() {
        assert_eq!(PackParams::new(1200.0, 260.0).gap, 8.0);
        assert_eq!(DEFAULT_GAP, 8.0);
    }

    #[test]
    fn single_landscape_item_is_capped_at_target() {
        let rows = pack(&[4.0 / 3.0], &PackParams::new(1200.0, 260.0)).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), 1);
        assert_eq!(rows[0].height, 260.0);
        assert!(close(rows[0].items[0].width, 260.0 * 4.0 / 3.0));
    }

    #[test]
    fn panoramic_item_gets_shorter_row() {
        let rows = pack(&[10.0], &PackParams::new(1200.0, 260.0)).unwrap();
        assert_eq!(rows.len(), 1);
        assert!(close(rows[0].height, 120.0));
        assert!(close(rows[0].items[0].width, 1200.0));
    }

    #[test]
    fn portrait_item_is_capped_at_target() {
        let rows = pack(&[0.1], &PackParams::new(1200.0, 260.0)).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].height, 260.0);
        assert!(close(rows[0].items[0].width, 26.0));
    }

    #[test]
    fn ten_landscape_items_fill_full_rows() {
        let rows = pack(&uniform(10, 4.0 / 3.0), &PackParams::new(1200.0, 260.0)).unwrap();

        let sizes: Vec<usize> = rows.iter().map(Row::len).collect();
        assert_eq!(sizes, [4, 4, 2]);

        for row in &rows[..rows.len() - 1] {
            assert!(close(row.total_width(8.0), 1200.0));
            assert!(close(row.height, 1176.0 / (16.0 / 3.0)));
        }
        assert_eq!(rows[2].height, 260.0);
    }

    #[test]
    fn rows_split_at_narrower_container() {
        let rows = pack(&uniform(6, 4.0 / 3.0), &PackParams::new(800.0, 200.0)).unwrap();
        assert_eq!(rows.len(), 2);
        // 784px of content over an aspect sum of 4 is below target, so no clamp
        assert!(close(rows[1].height, 196.0));
        assert!(close(rows[1].total_width(8.0), 800.0));
    }

    #[test]
    fn reaching_width_exactly_closes_row() {
        let params = PackParams::new(208.0, 100.0);
        let rows = pack(&uniform(3, 1.0), &params).unwrap();
        assert_eq!(rows[0].len(), 2);
        assert!(close(rows[0].height, 100.0));
        assert_eq!(rows[1].len(), 1);
    }

    #[test]
    fn zero_gap_is_allowed() {
        let params = PackParams::new(100.0, 50.0).with_gap(0.0);
        let rows = pack(&uniform(4, 1.0), &params).unwrap();
        assert_eq!(rows.len(), 2);
        for row in &rows {
            assert!(close(row.total_width(0.0), 100.0));
            assert!(close(row.height, 50.0));
        }
    }

    #[test]
    fn all_items_in_row_share_height() {
        let ratios = [1.5, 0.75, 1.0, 2.2, 0.6, 1.33, 0.9, 3.0];
        for row in pack(&ratios, &PackParams::new(1200.0, 260.0)).unwrap() {
            for item in &row.items {
                assert_eq!(item.height, row.height);
                assert!(close(item.width, item.aspect_ratio * row.height));
            }
        }
    }

    #[test]
    fn flattened_rows_keep_input_order() {
        let ratios = [1.5, 0.75, 1.0, 2.2, 0.6, 1.33, 0.9, 3.0, 1.0, 0.5];
        let rows = pack(&ratios, &PackParams::new(1000.0, 220.0)).unwrap();
        let indices: Vec<usize> = rows
            .iter()
            .flat_map(|row| row.items.iter().map(|item| item.index))
            .collect();
        assert_eq!(indices, (0..ratios.len()).collect::<Vec<_>>());
    }

    #[test]
    fn short_last_row_is_not_stretched() {
        let rows = pack(&[2.0, 2.0, 2.0, 0.5], &PackParams::new(1000.0, 200.0)).unwrap();
        let last = rows.last().unwrap();
        assert_eq!(last.height, 200.0);
        assert!(last.total_width(8.0) < 1000.0);
    }

    #[test]
    fn artworks_pack_by_pixel_size() {
        let artworks: Vec<Artwork> = [(1600, 1200), (1000, 1000), (800, 1200)]
            .iter()
            .enumerate()
            .map(|(i, &(width, height))| Artwork {
                id: format!("a{i}"),
                title: format!("Artwork {i}"),
                year: 2023,
                material: String::new(),
                src: format!("/img/{i}.jpg"),
                width,
                height,
                category: Default::default(),
            })
            .collect();

        let rows = pack(&artworks, &PackParams::new(1200.0, 260.0)).unwrap();
        let resolved: Vec<&str> = rows[0]
            .resolve(&artworks)
            .map(|(_, artwork)| artwork.id.as_str())
            .collect();
        assert_eq!(resolved, ["a0", "a1", "a2"]);
    }

    #[test]
    fn invalid_dimensions_are_rejected() {
        let items = [1.0];
        assert_eq!(
            pack(&items, &PackParams::new(0.0, 260.0)),
            Err(PackError::InvalidContainerWidth(0.0))
        );
        assert_eq!(
            pack(&items, &PackParams::new(1200.0, -5.0)),
            Err(PackError::InvalidRowHeight(-5.0))
        );
        assert_eq!(
            pack(&items, &PackParams::new(1200.0, 260.0).with_gap(-1.0)),
            Err(PackError::InvalidGap(-1.0))
        );
        assert!(pack(&items, &PackParams::new(f64::INFINITY, 260.0)).is_err());
    }

    #[test]
    fn invalid_aspect_ratio_fails_whole_call() {
        let result = pack(&[1.0, 0.0, 1.0], &PackParams::new(1200.0, 260.0));
        assert!(matches!(
            result,
            Err(PackError::InvalidAspectRatio { index: 1, .. })
        ));
        assert!(pack(&[f64::NAN], &PackParams::new(1200.0, 260.0)).is_err());
    }

    #[test]
    fn gaps_wider_than_container_fail_whole_call() {
        // the fourth item closes the first row, whose three gaps take 24 of 20px
        let result = pack(&[0.01; 6], &PackParams::new(20.0, 100.0));
        assert_eq!(
            result,
            Err(PackError::GapsExceedContainer {
                row: 0,
                gaps: 24.0,
                container_width: 20.0,
            })
        );
    }

    #[test]
    fn gaps_exactly_filling_container_fail() {
        let result = pack(&[0.01, 0.01, 0.01], &PackParams::new(16.0, 100.0));
        assert!(matches!(
            result,
            Err(PackError::GapsExceedContainer { row: 0, .. })
        ));
    }

    #[test]
    fn rows_serialize_to_json() {
        let rows = pack(&[10.0], &PackParams::new(1200.0, 260.0)).unwrap();
        let json = serde_json::to_value(&rows).unwrap();

        assert_eq!(json[0]["height"], 120.0);
        let item = &json[0]["items"][0];
        assert_eq!(item["index"], 0);
        assert_eq!(item["aspect_ratio"], 10.0);
        assert_eq!(item["width"], 1200.0);
        assert_eq!(item["height"], 120.0);
    }

    #[test]
    fn layout_height_adds_row_gaps() {
        let rows = pack(&uniform(10, 4.0 / 3.0), &PackParams::new(1200.0, 260.0)).unwrap();
        let expected = rows[0].height * 2.0 + 260.0 + 16.0;
        assert!(close(layout_height(&rows, 8.0), expected));
        assert_eq!(layout_height(&[], 8.0), 0.0);
    }
}
