#[cfg(feature = "serde")]
use super::ComparisonDataset;

#[cfg(feature = "serde")]
impl ComparisonDataset {
    /// Save the dataset as pretty-printed JSON.
    ///
    /// Requires the `serde` feature.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be created or written.
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> std::io::Result<()> {
        let mut writer = std::io::BufWriter::new(std::fs::File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self).map_err(std::io::Error::other)?;
        std::io::Write::flush(&mut writer)
    }

    /// Load a dataset previously written by [`save`](Self::save).
    ///
    /// Requires the `serde` feature.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read or does not hold a
    /// valid dataset.
    pub fn load(path: impl AsRef<std::path::Path>) -> std::io::Result<Self> {
        let file = std::fs::File::open(path)?;
        serde_json::from_reader(std::io::BufReader::new(file)).map_err(std::io::Error::other)
    }

    /// Serialize the dataset to a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
