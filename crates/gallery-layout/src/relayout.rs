// ABOUTME: Responsive relayout driven by container width changes.
// ABOUTME: Caches packed rows and repacks only when the observed width changes.

use std::sync::mpsc::{Receiver, TryRecvError};

use gallery_core::LayoutSettings;

use crate::justified::{pack, Aspect, PackError, PackParams, Row};

/// Source of container width measurements
pub trait WidthObserver {
    /// Latest width observed since the last poll, if any
    fn poll_width(&mut self) -> Option<f64>;
}

impl WidthObserver for Receiver<f64> {
    fn poll_width(&mut self) -> Option<f64> {
        let mut latest = None;
        loop {
            match self.try_recv() {
                Ok(width) => latest = Some(width),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        latest
    }
}

/// A gallery of items laid out for the most recently observed width
#[derive(Debug)]
pub struct Gallery<T> {
    items: Vec<T>,
    settings: LayoutSettings,
    container_width: f64,
    rows: Vec<Row>,
}

impl<T: Aspect> Gallery<T> {
    /// Nothing is laid out until the first width arrives
    pub fn new(items: Vec<T>, settings: LayoutSettings) -> Self {
        Self {
            items,
            settings,
            container_width: 0.0,
            rows: Vec::new(),
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn container_width(&self) -> f64 {
        self.container_width
    }

    pub fn target_row_height(&self) -> f64 {
        self.settings.row_height_for(self.container_width)
    }

    /// Relayout for a new container width. Returns whether the rows changed.
    ///
    /// A width of zero or less means the container has not been measured, which
    /// clears the rows.
    pub fn resize(&mut self, width: f64) -> Result<bool, PackError> {
        if width == self.container_width {
            return Ok(false);
        }

        if width <= 0.0 {
            self.container_width = 0.0;
            let had_rows = !self.rows.is_empty();
            self.rows.clear();
            return Ok(had_rows);
        }

        let params =
            PackParams::new(width, self.settings.row_height_for(width)).with_gap(self.settings.gap);
        let rows = pack(&self.items, &params)?;

        tracing::info!(
            "Relayout at {}px: {} rows, target height {}px",
            width,
            rows.len(),
            params.target_row_height
        );

        let changed = !self.rows.is_empty() || !rows.is_empty();
        self.container_width = width;
        self.rows = rows;
        Ok(changed)
    }

    /// Apply the latest width from an observer, if one arrived
    pub fn sync<O: WidthObserver + ?Sized>(&mut self, observer: &mut O) -> Result<bool, PackError> {
        match observer.poll_width() {
            Some(width) => self.resize(width),
            None => Ok(false),
        }
    }

    /// Row and column where the item at `index` was placed
    pub fn locate(&self, index: usize) -> Option<(usize, usize)> {
        self.rows.iter().enumerate().find_map(|(row, r)| {
            r.items
                .iter()
                .position(|item| item.index == index)
                .map(|column| (row, column))
        })
    }
}
