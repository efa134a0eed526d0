use compio::{fs::File, io::AsyncReadExt, io::BufReader};
use hashlink::LinkedHashMap;
use saphyr::{LoadableYamlNode, Scalar, Yaml};
use snafu::prelude::*;
use std::{
    borrow::Cow,
    io::Cursor,
    path::{Path, PathBuf},
};
use tracing::debug;

const CONFIG_FILE_NAME: &str = "selectree.yaml";
const RESERVED_NAMES_KEY: &str = "reserved_names";
const DEFAULT_RESERVED_NAMES: [&str; 1] = [".stignoreglobal"];

fn get_config_file_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE_NAME)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionConfig {
    /// Top-level names that are never materialized nor listed.
    reserved_names: Vec<String>,
}

impl SelectionConfig {
    /// Loads `selectree.yaml` from `root`, falling back to defaults when the
    /// file does not exist.
    pub async fn read(root: &Path) -> Result<Self, SelectionConfigError> {
        let path = get_config_file_path(root);
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::from_path(path).await
    }

    pub async fn from_path(path: PathBuf) -> Result<Self, SelectionConfigError> {
        debug!("Opening config file: {}", path.display());
        let file = File::open(&path).await.context(ReadSnafu {
            file_path: path.display().to_string(),
        })?;

        let cursor = Cursor::new(file);
        let mut reader = BufReader::new(cursor);
        let res = reader.read_to_string(String::new()).await;
        match res.0 {
            Ok(n) => debug!("Successfully read config file: {n} bytes"),
            Err(source) => {
                return Err(SelectionConfigError::ReadError {
                    file_path: path.display().to_string(),
                    source,
                });
            }
        }
        res.1.as_str().try_into()
    }

    pub fn with_reserved_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            reserved_names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn reserved_names(&self) -> &[String] {
        &self.reserved_names
    }

    fn parse_reserved_names(top_level: &LinkedHashMap<Yaml, Yaml>) -> Result<Option<Vec<String>>, SelectionConfigError> {
        let Some(value) = top_level.get(&Yaml::Value(Scalar::String(Cow::Borrowed(RESERVED_NAMES_KEY)))) else {
            return Ok(None);
        };
        let Yaml::Sequence(items) = value else {
            return Err(SelectionConfigError::ReservedNamesNotList);
        };

        let names = items
            .iter()
            .filter_map(|item| {
                if let Yaml::Value(Scalar::String(name)) = item {
                    return Some(name.to_string());
                }
                debug!("Skipping invalid reserved name: {:?}", item);
                None
            })
            .collect();
        Ok(Some(names))
    }
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self::with_reserved_names(DEFAULT_RESERVED_NAMES)
    }
}

impl TryFrom<&str> for SelectionConfig {
    type Error = SelectionConfigError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let documents = Yaml::load_from_str(contents).context(ParseSnafu)?;
        let document = documents.first().context(MalformedConfigSnafu)?;
        let top_level = document.as_mapping().context(TopLevelNotMapSnafu)?;

        Ok(match Self::parse_reserved_names(top_level)? {
            Some(names) => Self::with_reserved_names(names),
            None => Self::default(),
        })
    }
}

#[derive(Debug, Snafu)]
pub enum SelectionConfigError {
    #[snafu(display("Failed to read the config file: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("Failed to parse the config file"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Improperly formatted config file"))]
    MalformedConfig,
    #[snafu(display("Top level of config should be a map"))]
    TopLevelNotMap,
    #[snafu(display("'{}' should be a list of names", RESERVED_NAMES_KEY))]
    ReservedNamesNotList,
}
