//! CSV Data Loader Module
//! Loads the two source CSV files, cleans them, and joins them into one
//! record per country using Polars.

use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::model::CountryRecord;

/// Expected (normalized) column names in the country-attributes CSV.
const COUNTRY_COL: &str = "country";
const REGION_COL: &str = "region";
const GDP_COL: &str = "gdp ($ per capita)";

/// Expected (normalized) column names in the life-expectancy CSV.
const LIFE_EXPECTANCY_COL: &str = "life expectancy";
const INFANT_DEATHS_COL: &str = "infant deaths";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV {path}: {source}")]
    CsvError {
        path: PathBuf,
        source: PolarsError,
    },
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Missing expected column '{0}'")]
    MissingColumn(String),
    #[error("No column matching 'density' found in country data")]
    NoDensityColumn,
    #[error("Join produced no rows - country names do not match between files")]
    EmptyJoin,
}

/// Loader configuration.
///
/// `density_column` optionally pins the population-density column to an exact
/// (normalized) name. When unset the column is discovered by substring match
/// on "density", which is fragile against schema changes - an ambiguous match
/// takes the first hit and logs a warning.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    pub countries_path: PathBuf,
    pub life_path: PathBuf,
    pub density_column: Option<String>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            countries_path: PathBuf::from("countries of the world.csv"),
            life_path: PathBuf::from("Life Expectancy Data.csv"),
            density_column: None,
        }
    }
}

/// Load, clean, aggregate, and join both datasets into one record per country.
///
/// Called once at startup; the result is owned immutably by the app for the
/// process lifetime. Any failure here is fatal to startup.
pub fn load_dataset(config: &LoaderConfig) -> Result<Vec<CountryRecord>, LoaderError> {
    let countries = read_csv(&config.countries_path)?;
    let life = read_csv(&config.life_path)?;
    build_records(countries, life, config.density_column.as_deref())
}

/// Read a CSV file eagerly via the lazy reader.
fn read_csv(path: &Path) -> Result<DataFrame, LoaderError> {
    LazyCsvReader::new(path)
        .with_infer_schema_length(Some(10000))
        .with_ignore_errors(true)
        .finish()
        .and_then(|lazy| lazy.collect())
        .map_err(|source| LoaderError::CsvError {
            path: path.to_path_buf(),
            source,
        })
}

/// Full in-memory pipeline: clean both frames, aggregate, join, drop
/// incomplete rows, and materialize records.
pub(crate) fn build_records(
    countries: DataFrame,
    life: DataFrame,
    density_column: Option<&str>,
) -> Result<Vec<CountryRecord>, LoaderError> {
    let countries = prepare_countries(countries, density_column)?;
    let life_avg = aggregate_life(life)?;

    let joined = countries
        .lazy()
        .join(
            life_avg.lazy(),
            [col(COUNTRY_COL)],
            [col(COUNTRY_COL)],
            JoinArgs::new(JoinType::Inner),
        )
        .drop_nulls(None)
        .filter(
            col("gdp_per_capita")
                .is_not_nan()
                .and(col("population_density").is_not_nan())
                .and(col("life_expectancy").is_not_nan())
                .and(col("infant_deaths").is_not_nan()),
        )
        .collect()?;

    if joined.height() == 0 {
        return Err(LoaderError::EmptyJoin);
    }

    to_records(&joined)
}

/// Trim and lowercase all column headers in place.
fn normalize_headers(df: &mut DataFrame) -> Result<(), LoaderError> {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string().trim().to_lowercase())
        .collect();
    df.set_column_names(names)?;
    Ok(())
}

fn require_column(df: &DataFrame, name: &str) -> Result<(), LoaderError> {
    if df.get_column_names().iter().any(|c| c.as_str() == name) {
        Ok(())
    } else {
        Err(LoaderError::MissingColumn(name.to_string()))
    }
}

/// Parse a localized numeric text column: strip thousands separators, trim,
/// and cast non-strictly to Float64 (unparsable values become null).
fn parse_numeric(expr: Expr) -> Expr {
    expr.cast(DataType::String)
        .str()
        .replace_all(lit(","), lit(""), true)
        .str()
        .strip_chars(lit(NULL))
        .cast(DataType::Float64)
}

/// Normalize the join key: trim + lowercase.
fn normalize_key(expr: Expr) -> Expr {
    expr.cast(DataType::String)
        .str()
        .strip_chars(lit(NULL))
        .str()
        .to_lowercase()
}

/// Clean the country-attributes frame down to the four used columns.
fn prepare_countries(
    mut df: DataFrame,
    density_column: Option<&str>,
) -> Result<DataFrame, LoaderError> {
    normalize_headers(&mut df)?;
    require_column(&df, COUNTRY_COL)?;
    require_column(&df, REGION_COL)?;
    require_column(&df, GDP_COL)?;

    let density_col = match density_column {
        Some(name) => {
            require_column(&df, name)?;
            name.to_string()
        }
        None => find_density_column(&df)?,
    };

    let cleaned = df
        .lazy()
        .select([
            normalize_key(col(COUNTRY_COL)).alias(COUNTRY_COL),
            col(REGION_COL)
                .cast(DataType::String)
                .str()
                .strip_chars(lit(NULL))
                .alias(REGION_COL),
            parse_numeric(col(GDP_COL)).alias("gdp_per_capita"),
            parse_numeric(col(density_col.as_str())).alias("population_density"),
        ])
        .collect()?;

    Ok(cleaned)
}

/// Discover the density column by case-insensitive substring match.
/// Takes the first match when several columns qualify.
fn find_density_column(df: &DataFrame) -> Result<String, LoaderError> {
    let matches: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .filter(|name| name.contains("density"))
        .collect();

    match matches.as_slice() {
        [] => Err(LoaderError::NoDensityColumn),
        [one] => Ok(one.clone()),
        [first, ..] => {
            log::warn!(
                "Ambiguous density column match ({:?}), using '{}'",
                matches,
                first
            );
            Ok(first.clone())
        }
    }
}

/// Aggregate the life-expectancy time series to one row per country:
/// mean life expectancy and mean infant deaths (nulls ignored).
fn aggregate_life(mut df: DataFrame) -> Result<DataFrame, LoaderError> {
    normalize_headers(&mut df)?;
    require_column(&df, COUNTRY_COL)?;
    require_column(&df, LIFE_EXPECTANCY_COL)?;
    require_column(&df, INFANT_DEATHS_COL)?;

    let aggregated = df
        .lazy()
        .with_column(normalize_key(col(COUNTRY_COL)).alias(COUNTRY_COL))
        .group_by([col(COUNTRY_COL)])
        .agg([
            col(LIFE_EXPECTANCY_COL)
                .cast(DataType::Float64)
                .mean()
                .alias("life_expectancy"),
            col(INFANT_DEATHS_COL)
                .cast(DataType::Float64)
                .mean()
                .alias("infant_deaths"),
        ])
        .collect()?;

    Ok(aggregated)
}

/// Materialize the joined frame into records.
fn to_records(df: &DataFrame) -> Result<Vec<CountryRecord>, LoaderError> {
    let country = df.column(COUNTRY_COL)?.as_materialized_series().clone();
    let country = country.str()?;
    let region = df.column(REGION_COL)?.as_materialized_series().clone();
    let region = region.str()?;
    let gdp = df.column("gdp_per_capita")?.as_materialized_series().clone();
    let gdp = gdp.f64()?;
    let density = df
        .column("population_density")?
        .as_materialized_series()
        .clone();
    let density = density.f64()?;
    let life = df.column("life_expectancy")?.as_materialized_series().clone();
    let life = life.f64()?;
    let infant = df.column("infant_deaths")?.as_materialized_series().clone();
    let infant = infant.f64()?;

    let mut records = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        // All nulls were dropped before this point, so every cell is present.
        if let (Some(c), Some(r), Some(g), Some(d), Some(l), Some(inf)) = (
            country.get(i),
            region.get(i),
            gdp.get(i),
            density.get(i),
            life.get(i),
            infant.get(i),
        ) {
            records.push(CountryRecord {
                country: c.to_string(),
                region: r.to_string(),
                gdp_per_capita: g,
                population_density: d,
                life_expectancy: l,
                infant_deaths: inf,
            });
        }
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    fn countries_frame() -> DataFrame {
        df!(
            "Country " => ["Norway ", " Kenya", "Atlantis", "France"],
            "Region" => ["EUROPE  ", "AFRICA", "OCEANS", "EUROPE  "],
            "GDP ($ per capita)" => ["37,800", "1,000", "99", "27,600"],
            "Pop. Density (per sq. mi.)" => ["14", "66", "1", "110"],
        )
        .unwrap()
    }

    fn life_frame() -> DataFrame {
        df!(
            "Country" => ["NORWAY", "norway", "Kenya ", "kenya", "France", "Wakanda"],
            "Life expectancy " => [81.0, 83.0, 60.0, 62.0, 82.0, 90.0],
            "infant deaths" => [2.0, 4.0, 30.0, 34.0, 3.0, 1.0],
        )
        .unwrap()
    }

    #[test]
    fn headers_are_trimmed_and_lowercased() {
        let mut df = countries_frame();
        normalize_headers(&mut df).unwrap();
        let names: Vec<String> =
            df.get_column_names().iter().map(|s| s.to_string()).collect();
        assert!(names.contains(&"country".to_string()));
        assert!(names.contains(&"gdp ($ per capita)".to_string()));
        assert!(names.contains(&"pop. density (per sq. mi.)".to_string()));
    }

    #[test]
    fn gdp_parsing_strips_thousands_separators() {
        let cleaned = prepare_countries(countries_frame(), None).unwrap();
        let gdp = cleaned
            .column("gdp_per_capita")
            .unwrap()
            .as_materialized_series()
            .clone();
        let gdp = gdp.f64().unwrap();
        assert_eq!(gdp.get(0), Some(37800.0));
        assert_eq!(gdp.get(1), Some(1000.0));
    }

    #[test]
    fn unparsable_density_becomes_null() {
        let df = df!(
            "country" => ["norway"],
            "region" => ["europe"],
            "gdp ($ per capita)" => ["37,800"],
            "coastline density" => ["n/a"],
        )
        .unwrap();
        let cleaned = prepare_countries(df, None).unwrap();
        let density = cleaned
            .column("population_density")
            .unwrap()
            .as_materialized_series()
            .clone();
        assert_eq!(density.f64().unwrap().get(0), None);
    }

    #[test]
    fn density_column_discovered_by_substring() {
        let mut df = countries_frame();
        normalize_headers(&mut df).unwrap();
        assert_eq!(
            find_density_column(&df).unwrap(),
            "pop. density (per sq. mi.)"
        );
    }

    #[test]
    fn missing_density_column_is_fatal() {
        let df =
            df!("country" => ["a"], "region" => ["r"], "gdp ($ per capita)" => ["1"]).unwrap();
        assert!(matches!(
            prepare_countries(df, None),
            Err(LoaderError::NoDensityColumn)
        ));
    }

    #[test]
    fn explicit_density_column_is_validated() {
        let err = prepare_countries(countries_frame(), Some("no such column")).unwrap_err();
        assert!(matches!(err, LoaderError::MissingColumn(_)));
    }

    #[test]
    fn life_aggregation_averages_per_country() {
        let agg = aggregate_life(life_frame()).unwrap();
        assert_eq!(agg.height(), 4); // norway, kenya, france, wakanda

        let records = build_records(countries_frame(), life_frame(), None).unwrap();
        let norway = records.iter().find(|r| r.country == "norway").unwrap();
        assert_eq!(norway.life_expectancy, 82.0);
        assert_eq!(norway.infant_deaths, 3.0);
    }

    #[test]
    fn join_keeps_only_countries_in_both_sources() {
        let records = build_records(countries_frame(), life_frame(), None).unwrap();
        let names: Vec<&str> = records.iter().map(|r| r.country.as_str()).collect();
        // atlantis only in countries, wakanda only in life data
        assert!(names.contains(&"norway"));
        assert!(names.contains(&"kenya"));
        assert!(names.contains(&"france"));
        assert!(!names.contains(&"atlantis"));
        assert!(!names.contains(&"wakanda"));
    }

    #[test]
    fn rows_with_unparsable_numbers_are_dropped() {
        let countries = df!(
            "country" => ["norway", "kenya"],
            "region" => ["europe", "africa"],
            "gdp ($ per capita)" => ["37,800", "not a number"],
            "pop. density (per sq. mi.)" => ["14", "66"],
        )
        .unwrap();
        let records = build_records(countries, life_frame(), None).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].country, "norway");
    }

    #[test]
    fn region_values_are_trimmed() {
        let records = build_records(countries_frame(), life_frame(), None).unwrap();
        assert!(!records.is_empty());
        assert!(records.iter().all(|r| r.region == r.region.trim()));
    }

    #[test]
    fn disjoint_sources_report_empty_join() {
        let countries = df!(
            "country" => ["atlantis"],
            "region" => ["oceans"],
            "gdp ($ per capita)" => ["99"],
            "pop. density (per sq. mi.)" => ["1"],
        )
        .unwrap();
        assert!(matches!(
            build_records(countries, life_frame(), None),
            Err(LoaderError::EmptyJoin)
        ));
    }

    #[test]
    fn missing_input_file_is_fatal() {
        let config = LoaderConfig {
            countries_path: PathBuf::from("/definitely/not/here.csv"),
            life_path: PathBuf::from("/also/not/here.csv"),
            density_column: None,
        };
        assert!(matches!(
            load_dataset(&config),
            Err(LoaderError::CsvError { .. })
        ));
    }
}
