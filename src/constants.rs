//! Application constants for the stream data processor
//!
//! This module contains the fixed literals the pipeline depends on: file
//! patterns, workbook header probes, canonical column names, site alias tables,
//! and the regulator submission template with its lookup tables.

// =============================================================================
// File Discovery
// =============================================================================

/// File names that are never processed, wherever they appear in the input tree
pub const EXCLUDED_FILE_NAMES: &[&str] = &[".dropbox", "desktop.ini"];

/// Logger workbook file name pattern (anchored at the start of the name only)
pub const LOGGER_FILE_PATTERN: &str = r"^LOG.*\.xls";

/// Temperature export file name pattern
pub const TEMPERATURE_FILE_PATTERN: &str = r"(?i)^.*\.csv$";

// =============================================================================
// Output Files
// =============================================================================

/// Summary table for logger runs
pub const LOGGER_SUMMARY_FILE: &str = "StreamData.csv";

/// Summary table for temperature runs
pub const TEMPERATURE_SUMMARY_FILE: &str = "TemperatureData.csv";

/// Median regulatory export for logger runs
pub const REGULATORY_EXPORT_FILE: &str = "StreamData_DoE.csv";

/// Suffix of the per-site temperature regulatory export
pub const TEMPERATURE_EXPORT_SUFFIX: &str = "_Temperature_DoE.csv";

/// Diagnostic log written alongside the outputs
pub const DIAGNOSTIC_LOG_FILE: &str = "StreamData_errors.log";

/// Section marker between the canonical rows and the medians in a summary
pub const MEDIAN_SECTION_MARKER: &str = "MEDIAN VALUES";

// =============================================================================
// Logger Workbook Layout
// =============================================================================

/// Workbook structure constants for multi-parameter logger exports
pub mod workbook {
    /// Number of sheets a logger workbook must contain
    pub const REQUIRED_SHEET_COUNT: usize = 2;

    /// Site name cell on the first sheet (B19, zero-indexed)
    pub const SITE_CELL: (usize, usize) = (18, 1);

    /// Literal the first header cell of the data sheet must hold
    pub const DATA_HEADER_FIRST_CELL: &str = "Date";

    /// Header text of the dissolved-oxygen saturation column
    pub const OXYGEN_PERCENT_HEADER: &str = "D.O.[%]";

    /// Header text of the pH millivolt column
    pub const PH_MILLIVOLT_HEADER: &str = "mV[pH]";

    /// Source column holding the sample date
    pub const DATE_COLUMN: usize = 0;

    /// Source column holding the time of day
    pub const TIME_COLUMN: usize = 1;
}

// =============================================================================
// Temperature Export Layout
// =============================================================================

/// Structure constants for temperature / dissolved-oxygen logger CSV exports
pub mod temperature {
    /// Minimum number of columns in the header row
    pub const MIN_COLUMNS: usize = 7;

    /// Rows before the first data row (banner and header)
    pub const HEADER_ROWS: usize = 2;

    /// Column holding the reading date-time
    pub const DATETIME_COLUMN: usize = 1;

    /// Column whose header distinguishes the two layouts
    pub const LAYOUT_PROBE_COLUMN: usize = 2;

    /// Leading text of the probe column in dual-sensor exports
    pub const DUAL_SENSOR_PREFIX: &str = "DO";

    /// Leading text of the probe column in single-sensor exports
    pub const SINGLE_SENSOR_PREFIX: &str = "Temp";

    /// Date-time formats written by the logger software
    ///
    /// Two-digit years come first: `%Y` also accepts `17` as year 0017.
    pub const DATETIME_FORMATS: &[&str] = &[
        "%m/%d/%y %I:%M:%S %p",
        "%m/%d/%y %H:%M:%S",
        "%m/%d/%y %H:%M",
        "%m/%d/%Y %I:%M:%S %p",
        "%m/%d/%Y %H:%M:%S",
        "%m/%d/%Y %H:%M",
        "%Y-%m-%d %H:%M:%S",
    ];
}

/// Text date formats accepted in a workbook date column
///
/// `%m/%d/%y` precedes `%m/%d/%Y`, which would read `17` as year 0017.
pub const TEXT_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%y", "%m/%d/%Y"];

/// Text time formats accepted in a workbook time column
pub const TEXT_TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M"];

// =============================================================================
// Site Alias Tables
// =============================================================================

/// Logger workbook site labels (matched case-insensitively) and their canonical IDs
///
/// Unlisted labels pass through unchanged.
pub const LOGGER_SITE_ALIASES: &[(&str, &str)] = &[
    ("GC1", "GARRISON-01"),
    ("GARRISON1", "GARRISON-01"),
    ("GARRISON 1", "GARRISON-01"),
    ("GARISON 1", "GARRISON-01"),
    ("GC2", "GARRISON-02"),
    ("GARRISON2", "GARRISON-02"),
    ("GARRISON 2", "GARRISON-02"),
    ("YH1", "YELLOWHAWK-01"),
    ("YELLOWHAWK1", "YELLOWHAWK-01"),
    ("YELLOW HAWK 1", "YELLOWHAWK-01"),
    ("YH2", "YELLOWHAWK-02"),
    ("YELLOWHAWK2", "YELLOWHAWK-02"),
    ("YELLOW HAWK 2", "YELLOWHAWK-02"),
    ("RC1", "RUSSELL-01"),
    ("RUSSELL1", "RUSSELL-01"),
    ("RUSSEL 1", "RUSSELL-01"),
    ("TC1", "TITUS-01"),
    ("TITUS1", "TITUS-01"),
    ("CC1", "COLD-01"),
    ("COLD CREEK", "COLD-01"),
    ("MC1", "MILL-01"),
    ("MILL CK 1", "MILL-01"),
    ("MILL CREEK 1", "MILL-01"),
];

/// Temperature export banner names (exact after whitespace normalization)
///
/// Unlisted names reject the file.
pub const TEMPERATURE_SITE_ALIASES: &[(&str, &str)] = &[
    ("Garrison Creek at Bennington", "GARRISON-01"),
    ("Garrison Creek at Howard", "GARRISON-02"),
    ("Yellowhawk Creek at Plaza Way", "YELLOWHAWK-01"),
    ("Yellowhawk Creek at Cottonwood", "YELLOWHAWK-02"),
    ("Russell Creek at Sudbury", "RUSSELL-01"),
    ("Titus Creek at Ankeny", "TITUS-01"),
    ("Cold Creek at Mojonnier", "COLD-01"),
    ("Mill Creek at Tausick", "MILL-01"),
];

// =============================================================================
// Regulatory Submission Template
// =============================================================================

/// Regulator submission template and fixed field values
pub mod regulatory {
    /// Column order prescribed by the agency (58 columns)
    pub const COLUMNS: [&str; 58] = [
        "Study_ID",
        "Location_ID",
        "Study_Specific_Location_ID",
        "Field_Collection_Type",
        "Field_Collector",
        "Field_Collection_Reference",
        "Field_Collection_Start_Date",
        "Field_Collection_Start_Time",
        "Field_Collection_End_Date",
        "Field_Collection_End_Time",
        "Field_Collection_Comment",
        "Field_Collection_Upper_Depth",
        "Field_Collection_Lower_Depth",
        "Field_Collection_Depth_Units",
        "Sample_ID",
        "Result_Parameter_Name",
        "Result_Parameter_CAS_Number",
        "Result_Value",
        "Result_Value_Units",
        "Result_Reporting_Limit",
        "Result_Reporting_Limit_Type",
        "Result_Detection_Limit",
        "Result_Detection_Limit_Type",
        "Result_Data_Qualifier",
        "Result_Method",
        "Result_Comment",
        "Sample_Matrix",
        "Sample_Source",
        "Sample_Field_Replicate_ID",
        "Sample_Replicate_Flag",
        "Sample_Sub_ID",
        "Sample_Composite_Flag",
        "Sample_Collection_Method",
        "Sample_Preparation_Method",
        "Fraction_Analyzed",
        "Field_Filtered",
        "Field_Filter_Size",
        "Field_Filter_Size_Units",
        "Result_Basis",
        "Digestion_Method",
        "Water_Sediment_Cleanup_Method",
        "Instrument_ID",
        "Lab_ID",
        "Lab_Analysis_Date",
        "Lab_Analysis_Date_Accuracy",
        "Lab_Analysis_Time",
        "Result_Lab_Replicate_ID",
        "Lab_Sample_ID",
        "Lab_Batch_ID",
        "QC_Sample_Type",
        "Result_Value_Reported",
        "Result_Value_Reported_Units",
        "Result_Taxon_Name",
        "Result_Taxon_TSN",
        "Result_Taxon_Life_Stage",
        "Result_Taxon_Sex",
        "Result_Taxon_Unidentified_Species",
        "Result_Taxon_Comment",
    ];

    pub const STUDY_ID: usize = 0;
    pub const LOCATION_ID: usize = 1;
    pub const FIELD_COLLECTION_TYPE: usize = 3;
    pub const FIELD_COLLECTOR: usize = 4;
    pub const START_DATE: usize = 6;
    pub const START_TIME: usize = 7;
    pub const FIELD_COLLECTION_COMMENT: usize = 10;
    pub const PARAMETER_NAME: usize = 15;
    pub const RESULT_VALUE: usize = 17;
    pub const RESULT_UNITS: usize = 18;
    pub const RESULT_METHOD: usize = 24;
    pub const SAMPLE_MATRIX: usize = 26;
    pub const SAMPLE_SOURCE: usize = 27;

    pub const COLLECTION_TYPE_VALUE: &str = "Measurement";
    pub const SAMPLE_MATRIX_VALUE: &str = "Water";
    pub const SAMPLE_SOURCE_VALUE: &str = "Fresh/Surface Water";
    pub const MEDIAN_COMMENT: &str = "Daily median";

    /// Date format for the collection date fields
    pub const DATE_FORMAT: &str = "%m/%d/%Y";

    /// Time format for the collection time fields
    pub const TIME_FORMAT: &str = "%H:%M:%S";
}

// =============================================================================
// Defaults
// =============================================================================

/// Default regulator study identifier
pub const DEFAULT_STUDY_ID: &str = "KC_STREAMS";

/// Default field collector recorded in the regulatory export
pub const DEFAULT_FIELD_COLLECTOR: &str = "Kooskooskie Commons";

/// Default output directory name when none is configured
pub const DEFAULT_OUTPUT_DIR: &str = "ProcessedStreamData";

/// Interval at which the control surface polls the status channel
pub const STATUS_POLL_INTERVAL_MS: u64 = 100;

/// Environment variable overriding the input directory
pub const ENV_INPUT_DIR: &str = "STREAMDATA_INPUT";

/// Environment variable overriding the output directory
pub const ENV_OUTPUT_DIR: &str = "STREAMDATA_OUTPUT";
