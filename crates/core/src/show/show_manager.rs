use std::fs;
use std::path::{Path, PathBuf};

use crate::{PlanError, PlannerSettings, Result, ShowPlan};

/// Holds the show currently being edited and where it lives on disk.
///
/// Loads are all-or-nothing: a file that fails to parse or validate leaves
/// the current show and path untouched.
pub struct ShowManager {
    shows_directory: PathBuf,
    room_order: Vec<String>,
    keep_backup: bool,
    current_show: ShowPlan,
    current_path: Option<PathBuf>,
}

impl ShowManager {
    pub fn new(settings: &PlannerSettings) -> Result<Self> {
        let shows_directory = match &settings.shows_directory {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };

        Ok(Self {
            shows_directory,
            room_order: settings.room_order.clone(),
            keep_backup: settings.autosave_backup,
            current_show: ShowPlan::with_rooms(&settings.room_order),
            current_path: None,
        })
    }

    pub fn current_show(&self) -> &ShowPlan {
        &self.current_show
    }

    pub fn current_show_mut(&mut self) -> &mut ShowPlan {
        &mut self.current_show
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.current_path.as_deref()
    }

    pub fn room_order(&self) -> &[String] {
        &self.room_order
    }

    /// Clear every room and forget the current file.
    pub fn new_show(&mut self) -> &ShowPlan {
        self.current_show = ShowPlan::with_rooms(&self.room_order);
        self.current_path = None;
        &self.current_show
    }

    /// Read a show file and arrange it against the configured room order.
    pub fn load_show(&mut self, path: &Path) -> Result<&ShowPlan> {
        let content = fs::read_to_string(path)?;
        let loaded = ShowPlan::from_json_str(&content)?;
        log::info!(
            "loaded {} ({} rooms, {} cues)",
            path.display(),
            loaded.rooms.len(),
            loaded.cue_count()
        );

        self.current_show = loaded.arranged(&self.room_order);
        self.current_path = Some(path.to_path_buf());
        Ok(&self.current_show)
    }

    /// Save to the current path. Fails if the show has never been saved.
    pub fn save_show(&mut self) -> Result<PathBuf> {
        let path = self.current_path.clone().ok_or_else(|| {
            PlanError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "show has no file yet; use save_show_as",
            ))
        })?;
        self.write_to(&path)?;
        Ok(path)
    }

    /// Save under a new path. Any extension other than `.json` is replaced.
    pub fn save_show_as(&mut self, path: &Path) -> Result<PathBuf> {
        let path = if is_show_file(path) {
            path.to_path_buf()
        } else {
            path.with_extension("json")
        };
        self.write_to(&path)?;
        self.current_path = Some(path.clone());
        Ok(path)
    }

    fn write_to(&self, path: &Path) -> Result<()> {
        let content = self.current_show.to_json_string()?;

        if self.keep_backup && path.exists() {
            let backup = path.with_extension("json.bak");
            fs::copy(path, &backup)?;
            log::debug!("backed up {} to {}", path.display(), backup.display());
        }

        fs::write(path, content)?;
        log::info!("saved show to {}", path.display());
        Ok(())
    }

    /// Show files (`*.json`) in the shows directory, sorted by path.
    pub fn list_shows(&self) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(&self.shows_directory)?;

        let mut shows = Vec::new();
        for entry in entries {
            let entry = entry?;
            let path = entry.path();

            if path.is_file() && is_show_file(&path) {
                shows.push(path);
            }
        }

        shows.sort();
        Ok(shows)
    }
}

fn is_show_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
