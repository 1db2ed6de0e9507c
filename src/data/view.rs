use super::model::{ContentRecord, Dataset};

// ---------------------------------------------------------------------------
// DatasetView – a read-only row selection over a Dataset
// ---------------------------------------------------------------------------

/// Borrowed view over a subset of a [`Dataset`], stored as row indices in
/// ascending (input) order.
#[derive(Debug, Clone)]
pub struct DatasetView<'a> {
    dataset: &'a Dataset,
    indices: Vec<usize>,
}

impl<'a> DatasetView<'a> {
    /// View over every record.
    pub fn full(dataset: &'a Dataset) -> Self {
        DatasetView {
            dataset,
            indices: (0..dataset.len()).collect(),
        }
    }

    /// Restrict this view to the rows that pass `keep`, preserving order.
    pub(crate) fn retain(&self, mut keep: impl FnMut(&ContentRecord) -> bool) -> Self {
        let records = self.dataset.records();
        DatasetView {
            dataset: self.dataset,
            indices: self
                .indices
                .iter()
                .copied()
                .filter(|&i| keep(&records[i]))
                .collect(),
        }
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    /// Row indices into [`Dataset::records`].
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Records in input order.
    pub fn records(&self) -> impl Iterator<Item = &'a ContentRecord> + '_ {
        let records = self.dataset.records();
        self.indices.iter().map(move |&i| &records[i])
    }

    /// Project a single column out of the selected records.
    pub fn column<T: 'a>(
        &self,
        get: impl Fn(&'a ContentRecord) -> T + 'a,
    ) -> Box<dyn Iterator<Item = T> + '_> {
        Box::new(self.records().map(get))
    }

    pub fn engagement_scores(&self) -> Box<dyn Iterator<Item = f64> + '_> {
        self.column(|r| r.engagement_score)
    }

    pub fn completion_rates(&self) -> Box<dyn Iterator<Item = f64> + '_> {
        self.column(|r| r.completion_rate)
    }

    pub fn viewership_hours(&self) -> Box<dyn Iterator<Item = f64> + '_> {
        self.column(|r| r.viewership_hours)
    }

    pub fn imdb_scores(&self) -> Box<dyn Iterator<Item = f64> + '_> {
        self.column(|r| r.imdb_score)
    }

    pub fn release_years(&self) -> Box<dyn Iterator<Item = i32> + '_> {
        self.column(|r| r.release_year)
    }
}
