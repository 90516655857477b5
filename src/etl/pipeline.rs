//! Pipeline orchestration for ETL operations

use super::{Extractor, Loader, Transformer};
use crate::error::{EtlError, Result};
use serde::Serialize;

/// Where a pipeline run is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PipelineState {
    NotStarted,
    Extracted,
    Transformed,
    Loaded,
    /// Extraction failed, nothing was transformed or loaded
    Aborted,
}

/// Result of one loader
#[derive(Debug, Serialize)]
pub struct LoadOutcome {
    pub destination: String,
    #[serde(serialize_with = "serialize_outcome")]
    pub result: Result<usize>,
}

fn serialize_outcome<S>(result: &Result<usize>, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use serde::ser::SerializeMap;

    let mut map = serializer.serialize_map(Some(1))?;
    match result {
        Ok(count) => map.serialize_entry("loaded", count)?,
        Err(err) => map.serialize_entry("error", &err.to_string())?,
    }
    map.end()
}

/// Summary of a completed (non-aborted) pipeline run
#[derive(Debug, Serialize)]
pub struct PipelineReport {
    /// Lifecycle state the run finished in
    pub state: PipelineState,
    /// Rows read from the source
    pub extracted: usize,
    /// Rows remaining after transformation
    pub cleaned: usize,
    /// One entry per loader, in the order they ran
    pub outcomes: Vec<LoadOutcome>,
}

impl PipelineReport {
    /// True when every loader succeeded
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }

    /// Errors raised by loaders
    pub fn failures(&self) -> impl Iterator<Item = &EtlError> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().err())
    }
}

/// ETL Pipeline that orchestrates Extract, Transform, and Load operations
///
/// # Type Parameters
/// - `E`: Extractor type
/// - `T`: Transformer type (must transform from `E::Item`)
///
/// Loaders are added with [`with_loader`](Pipeline::with_loader) and run in
/// insertion order. A failing loader does not stop the ones after it.
///
/// # Example
/// ```
/// use customer_etl::etl::{Extractor, Loader, Pipeline, PipelineState, Table, Transformer};
/// use customer_etl::record::Columns;
/// use customer_etl::Result;
///
/// struct Numbers;
/// impl Extractor for Numbers {
///     type Item = i32;
///     fn extract(&self) -> Result<Table<i32>> {
///         Ok(Table::new(Columns::new(["n"]), vec![1, 2, 3]))
///     }
/// }
///
/// struct Positive;
/// impl Transformer for Positive {
///     type Input = i32;
///     type Output = i32;
///     fn transform(&self, input: i32) -> Result<Option<i32>> {
///         Ok(Some(input))
///     }
/// }
///
/// struct Count;
/// impl Loader for Count {
///     type Item = i32;
///     fn destination(&self) -> String { "count".into() }
///     fn load(&self, table: &Table<i32>) -> Result<usize> { Ok(table.len()) }
/// }
///
/// let mut pipeline = Pipeline::new(Numbers, Positive).with_loader(Count);
/// let report = pipeline.run().unwrap();
/// assert_eq!(report.cleaned, 3);
/// assert_eq!(pipeline.state(), PipelineState::Loaded);
/// ```
pub struct Pipeline<'a, E, T>
where
    T: Transformer,
{
    extractor: E,
    transformer: T,
    loaders: Vec<Box<dyn Loader<Item = T::Output> + 'a>>,
    state: PipelineState,
}

impl<'a, E, T> Pipeline<'a, E, T>
where
    E: Extractor,
    T: Transformer<Input = E::Item>,
{
    /// Create a new pipeline with no loaders
    pub fn new(extractor: E, transformer: T) -> Self {
        Self {
            extractor,
            transformer,
            loaders: Vec::new(),
            state: PipelineState::NotStarted,
        }
    }

    /// Add a destination for the cleaned table
    pub fn with_loader(mut self, loader: impl Loader<Item = T::Output> + 'a) -> Self {
        self.loaders.push(Box::new(loader));
        self
    }

    /// State reached by the last call to [`run`](Pipeline::run)
    pub fn state(&self) -> PipelineState {
        self.state
    }

    fn advance(&mut self, next: PipelineState) {
        log::debug!("Pipeline state: {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    /// Run the complete ETL pipeline
    ///
    /// Steps:
    /// 1. Extract the table from the source
    /// 2. Transform it
    /// 3. Hand the cleaned table to every loader
    ///
    /// # Errors
    /// Returns the extraction error if the source cannot be read; nothing is
    /// transformed or loaded in that case. Loader errors are reported in the
    /// returned [`PipelineReport`] instead.
    pub fn run(&mut self) -> Result<PipelineReport> {
        self.state = PipelineState::NotStarted;

        // Extract
        let table = match self.extractor.extract() {
            Ok(table) => table,
            Err(err) => {
                self.advance(PipelineState::Aborted);
                return Err(err);
            }
        };
        let extracted = table.len();
        log::info!("Extracted {} row(s)", extracted);
        self.advance(PipelineState::Extracted);

        // Transform
        log::info!("Starting transformation...");
        let cleaned = self.transformer.transform_table(table)?;
        log::info!(
            "Transformation complete: {} of {} row(s) kept",
            cleaned.len(),
            extracted
        );
        self.advance(PipelineState::Transformed);

        // Load
        let mut outcomes = Vec::with_capacity(self.loaders.len());
        for loader in &self.loaders {
            let destination = loader.destination();
            log::debug!("Loading to {}...", destination);
            let result = loader.load(&cleaned);
            match &result {
                Ok(count) => log::info!("Loaded {} record(s) into {}", count, destination),
                Err(err) => log::error!("{}", err),
            }
            outcomes.push(LoadOutcome {
                destination,
                result,
            });
        }
        self.advance(PipelineState::Loaded);

        Ok(PipelineReport {
            state: self.state,
            extracted,
            cleaned: cleaned.len(),
            outcomes,
        })
    }
}
