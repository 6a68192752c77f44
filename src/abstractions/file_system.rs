use std::{env, path::{Path, PathBuf}};

use anyhow::{anyhow, Result};
use hashbrown::HashMap;

pub trait FileSystem {
    fn exists(&self, path: &Path) -> bool;
    fn read_to_string(&self, path: &Path) -> Result<String>;
    fn write(&mut self, path: &Path, contents: &str) -> Result<()>;
    fn get_executable_directory(&self) -> Result<PathBuf>;
}

pub struct DefaultFileSystem;

impl FileSystem for DefaultFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path).map_err(|e| anyhow!("Could not read {}: {}", path.display(), e))
    }

    fn write(&mut self, path: &Path, contents: &str) -> Result<()> {
        std::fs::write(path, contents).map_err(|e| anyhow!("Could not write {}: {}", path.display(), e))
    }

    fn get_executable_directory(&self) -> Result<PathBuf> {
        let executable_path = env::current_exe()?;
        let executable_directory = executable_path
            .parent()
            .ok_or_else(|| anyhow!("executable has no parent directory"))?;

        Ok(executable_directory.to_path_buf())
    }
}

impl DefaultFileSystem {
    pub fn new() -> Self {
        Self
    }
}

pub struct MemoryFileSystem {
    map: HashMap<PathBuf, String>,
}

impl FileSystem for MemoryFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.map.contains_key(path)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.map
            .get(path)
            .cloned()
            .ok_or_else(|| anyhow!("File not found: {:?}", path))
    }

    fn write(&mut self, path: &Path, contents: &str) -> Result<()> {
        self.map.insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    fn get_executable_directory(&self) -> Result<PathBuf> {
        Ok(env::temp_dir())
    }
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }
}
