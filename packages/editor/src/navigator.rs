//! # Page Navigator
//!
//! The store counts pages from zero; surfaces inside the document are
//! addressed by one-based position. Every surface lookup goes through
//! [`surface_position`] so the offset lives in exactly one place.

use facsimile_mei::{MeiDocument, SurfaceEntry};

use crate::errors::StructuralLookupError;

/// One-based surface position for a zero-based page index
pub fn surface_position(page_index: usize) -> usize {
    page_index + 1
}

/// Current page pointer bounded by the page count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageNavigator {
    current: Option<usize>,
    page_count: usize,
}

impl PageNavigator {
    /// Point at the first page of a freshly loaded page list
    pub fn reset(&mut self, page_count: usize) {
        self.page_count = page_count;
        self.current = Some(0);
    }

    /// Move to `index` if it names a page; returns whether it moved
    pub fn go_to(&mut self, index: usize) -> bool {
        if index < self.page_count {
            self.current = Some(index);
            true
        } else {
            false
        }
    }

    pub fn zero_based(&self) -> Option<usize> {
        self.current
    }

    pub fn one_based(&self) -> Option<usize> {
        self.current.map(surface_position)
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Surface for the page on screen
    pub fn locate_surface<'d>(
        &self,
        doc: &'d MeiDocument,
    ) -> Result<&'d SurfaceEntry, StructuralLookupError> {
        let position = self.one_based().unwrap_or(0);
        doc.index()
            .surface(position)
            .ok_or(StructuralLookupError::SurfaceNotFound {
                position,
                surfaces: doc.index().surface_count(),
            })
    }
}
