#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::config::loader::{
        CONFIG_ENV_VAR, ConfigError, get_config_file_path, load_config_from_file,
        load_config_from_path, save_config_to_path,
    };
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    // Helper function to create a test config path
    fn create_test_config_path() -> (tempfile::TempDir, PathBuf) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let config_path = temp_dir.path().join("test_config.toml");
        (temp_dir, config_path)
    }

    #[test]
    fn test_load_nonexistent_config() {
        let (_temp_dir, config_path) = create_test_config_path();

        // Loading a non-existent config should create a default one
        let config = load_config_from_path(&config_path).expect("Failed to load default config");

        assert!(config_path.exists(), "Config file should have been created");
        assert_eq!(config, Config::default());
        assert!(config.display.show_grid);
        assert_eq!(config.timing.frame_ms, 16);
        assert_eq!(config.game.seed, None);
    }

    #[test]
    fn test_save_and_load_config() {
        let (_temp_dir, config_path) = create_test_config_path();

        let mut config = Config::default();
        config.display.show_controls = false;
        config.timing.input_poll_ms = 12;
        config.game.seed = Some(99);

        save_config_to_path(&config, &config_path).expect("Failed to save config");
        let loaded_config = load_config_from_path(&config_path).expect("Failed to load config");

        assert_eq!(loaded_config, config);
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let config_path = temp_dir.path().join("nested").join("dir").join("config.toml");

        save_config_to_path(&Config::default(), &config_path).expect("Failed to save config");

        assert!(config_path.exists());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let (_temp_dir, config_path) = create_test_config_path();
        fs::write(&config_path, "[game]\nseed = 42\n").expect("Failed to write config");

        let config = load_config_from_path(&config_path).expect("Failed to load config");

        assert_eq!(config.game.seed, Some(42));
        assert!(config.display.show_next_piece);
        assert_eq!(config.timing.input_poll_ms, 5);
    }

    #[test]
    fn test_invalid_config() {
        let (_temp_dir, config_path) = create_test_config_path();
        fs::write(&config_path, "this is not valid TOML").expect("Failed to write invalid config");

        let result = load_config_from_path(&config_path);

        assert!(matches!(result, Err(ConfigError::Parse(_))));
        let message = result.unwrap_err().to_string();
        assert!(message.starts_with("config parse error"));
    }

    #[test]
    fn test_wrong_type_is_parse_error() {
        let (_temp_dir, config_path) = create_test_config_path();
        fs::write(&config_path, "[timing]\nframe_ms = \"fast\"\n").expect("Failed to write config");

        let result = load_config_from_path(&config_path);

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_env_var_overrides_config_path() {
        let (_temp_dir, config_path) = create_test_config_path();

        // Only this test touches the environment
        unsafe {
            std::env::set_var(CONFIG_ENV_VAR, config_path.to_str().unwrap());
        }

        assert_eq!(get_config_file_path(), config_path);
        let config = load_config_from_file().expect("Failed to load config");
        assert_eq!(config, Config::default());
        assert!(config_path.exists());

        unsafe {
            std::env::remove_var(CONFIG_ENV_VAR);
        }
    }
}
