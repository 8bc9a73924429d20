//! The [`Analyzer`] facade: load a table once, then summarise, tabulate,
//! chart and report on it.
//!
//! ```no_run
//! use tabscope::analyser::{Analyzer, DrawingContext, PlotRequest};
//! use std::path::Path;
//!
//! # fn main() -> tabscope::error::Result<()> {
//! let analyzer = Analyzer::new("sample_data.csv")?;
//! analyzer.save_analysis_report(Path::new("analysis_report.json"))?;
//!
//! let mut ctx = DrawingContext::default();
//! let id = analyzer.create_visualization(
//!     &mut ctx,
//!     &PlotRequest::parse("bar", "customer_type")?.with_title("Customer Type Distribution"),
//! )?;
//! ctx.save(id, Path::new("customer_distribution.svg"))?;
//! # Ok(())
//! # }
//! ```
//!
//! The loaded table is never modified. Every statistic is recomputed on
//! request rather than cached.

pub mod frequency;
pub mod io;
pub mod plots;
pub mod report;
pub mod stats;

pub use frequency::{FrequencyEntry, FrequencyTable};
pub use io::SourceFormat;
pub use plots::{DrawingContext, Figure, FigureId, Marks, PlotKind, PlotRequest};
pub use report::Report;
pub use stats::{ColumnStatistics, SummaryStatistics};

use crate::config::Settings;
use crate::error::Result;
use polars::prelude::DataFrame;
use std::path::Path;

/// A loaded table plus the settings used to chart and report on it.
///
/// Construction reads the whole file; every later operation works on the
/// in-memory frame and never touches the source again.
pub struct Analyzer {
    source_name: String,
    df: DataFrame,
    settings: Settings,
}

impl Analyzer {
    /// Loads `path` with default settings.
    ///
    /// # Errors
    ///
    /// - [`UnsupportedFormat`](crate::error::AnalyzerError::UnsupportedFormat)
    ///   unless the extension is `csv` or `json`
    /// - [`Io`](crate::error::AnalyzerError::Io) if the file cannot be read
    /// - `Data`/`Json` if its content cannot be parsed into a table
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        Self::with_settings(path, Settings::default())
    }

    /// Loads `path` using `settings` for schema inference, charts and reports.
    ///
    /// # Errors
    ///
    /// Same as [`Analyzer::new`].
    pub fn with_settings(path: impl AsRef<Path>, settings: Settings) -> Result<Self> {
        let path = path.as_ref();
        let df = io::load_df(path, settings.infer_schema_length)?;
        let source_name = display_name(path);

        Ok(Self {
            source_name,
            df,
            settings,
        })
    }

    /// Wraps an in-memory table; `source_name` stands in for the file name.
    pub fn from_frame(source_name: impl Into<String>, df: DataFrame, settings: Settings) -> Self {
        Self {
            source_name: source_name.into(),
            df,
            settings,
        }
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn frame(&self) -> &DataFrame {
        &self.df
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn row_count(&self) -> usize {
        self.df.height()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect()
    }

    /// Mean, median, sample std, min and max for every `Int64`/`Float64` column.
    ///
    /// # Errors
    ///
    /// Returns `Data` if polars fails to cast a column to `Float64`.
    pub fn generate_summary_statistics(&self) -> Result<SummaryStatistics> {
        stats::summary_statistics(&self.df)
    }

    /// Value counts for `column_name`, most frequent first.
    ///
    /// # Errors
    ///
    /// Returns [`ColumnNotFound`](crate::error::AnalyzerError::ColumnNotFound)
    /// naming the column if it is absent.
    pub fn analyze_categorical_data(&self, column_name: &str) -> Result<FrequencyTable> {
        frequency::frequency_table(&self.df, column_name)
    }

    /// Builds the requested chart into `ctx` and returns its handle.
    ///
    /// Nothing is added to `ctx` when the request fails.
    ///
    /// # Errors
    ///
    /// - `ColumnNotFound` for an absent x or y column
    /// - `MissingParameter` for a scatter plot without `y_column`
    /// - `NonNumericColumn` when scatter, line or histogram get a text column
    pub fn create_visualization(
        &self,
        ctx: &mut DrawingContext,
        request: &PlotRequest,
    ) -> Result<FigureId> {
        let figure = plots::build_figure(
            &self.df,
            request,
            self.settings.histogram_bins,
            ctx.size(),
        )?;
        tracing::debug!("Built {} figure '{}'", figure.kind, figure.title);
        Ok(ctx.push(figure))
    }

    /// Assembles the report without writing it.
    ///
    /// # Errors
    ///
    /// Same as [`Analyzer::generate_summary_statistics`].
    pub fn build_report(&self) -> Result<Report> {
        Ok(Report::new(
            self.source_name.clone(),
            self.generate_summary_statistics()?,
        ))
    }

    /// Writes the JSON report to `output_path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns [`Io`](crate::error::AnalyzerError::Io) if the path is not writable.
    pub fn save_analysis_report(&self, output_path: &Path) -> Result<()> {
        self.build_report()?
            .write(output_path, self.settings.report_indent)
    }
}

// Base name of the input; non-UTF-8 bytes are replaced rather than dropped.
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Unknown".to_owned())
}
