use serde::de::DeserializeOwned;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads the configuration of the emulator for a given stage.
    ///
    /// This will load the following files, in order:
    /// - OS environment variables
    /// - `.env.<stage>.local`
    /// - `.env.<stage>`
    /// - `.env.local`
    /// - `.env`
    ///
    /// Variables are not overriden, the first file to contain
    /// a definition for a variable is the one that will be set.
    ///
    /// If a variable is set in the OS environment, it will not be
    /// overriden by any file.
    pub fn load_for_stage<TConfig>(stage: &str) -> Result<TConfig, envy::Error>
    where
        TConfig: DeserializeOwned,
    {
        if !stage.is_empty() {
            dotenv::from_filename(format!(".env.{stage}.local")).ok();
            dotenv::from_filename(format!(".env.{stage}")).ok();
        }

        ConfigLoader::load::<TConfig>()
    }

    /// Builds a configuration from explicit `(NAME, value)` pairs without reading or
    /// modifying the process environment.
    pub fn from_pairs<TConfig, I, K, V>(pairs: I) -> Result<TConfig, envy::Error>
    where
        TConfig: DeserializeOwned,
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        envy::from_iter(pairs.into_iter().map(|(k, v)| (k.into(), v.into())))
    }

    fn load<TConfig>() -> Result<TConfig, envy::Error>
    where
        TConfig: DeserializeOwned,
    {
        dotenv::from_filename(".env.local").ok();
        dotenv::from_filename(".env").ok();

        envy::from_env::<TConfig>()
    }
}
