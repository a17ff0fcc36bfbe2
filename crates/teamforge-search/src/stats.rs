use serde::Serialize;

/// Summary of the fitness values of one population.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FitnessStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
}

impl FitnessStats {
    /// Computes statistics from unsorted values, or `None` if there are none.
    ///
    /// ```
    /// # use teamforge_search::stats::FitnessStats;
    /// let stats = FitnessStats::new([0.5, 0.2, 0.4, 0.1, 0.3]).unwrap();
    /// assert_eq!(stats.min, 0.1);
    /// assert_eq!(stats.max, 0.5);
    /// assert_eq!(stats.median, 0.3);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values = values.into_iter().collect::<Vec<_>>();
        values.sort_by(f64::total_cmp);

        let min = *values.first()?;
        let max = *values.last()?;
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let median = values[values.len() / 2];
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

        Some(Self {
            min,
            max,
            mean,
            median,
            std_dev: variance.sqrt(),
        })
    }
}
