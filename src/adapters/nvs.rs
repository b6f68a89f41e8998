//! NVS (Non-Volatile Storage) adapter for the high score.
//!
//! Implements [`HighScoreStore`] over a single `u8` key.
//!
//! - **`target_os = "espidf"`** — raw ESP-IDF NVS calls.  `nvs_commit` is
//!   atomic, so a power cut never leaves a half-written score.
//! - **`not(target_os = "espidf")`** — an in-memory slot for simulation.

use log::info;
#[cfg(target_os = "espidf")]
use log::warn;

use crate::app::ports::{HighScoreStore, StorageError};

#[cfg(target_os = "espidf")]
use core::ffi::CStr;
#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
const NAMESPACE: &CStr = c"lasertarget";
#[cfg(target_os = "espidf")]
const HIGH_SCORE_KEY: &CStr = c"highscore";

pub struct NvsHighScoreStore {
    #[cfg(not(target_os = "espidf"))]
    slot: Option<u8>,
}

impl NvsHighScoreStore {
    /// Initialise NVS flash.  On first boot or after a layout change the
    /// partition is erased and re-initialised.
    pub fn new() -> Result<Self, StorageError> {
        #[cfg(target_os = "espidf")]
        {
            // SAFETY: called once from the main task before any other NVS use.
            let ret = unsafe { nvs_flash_init() };
            if ret == ESP_ERR_NVS_NO_FREE_PAGES || ret == ESP_ERR_NVS_NEW_VERSION_FOUND {
                warn!("NVS: erasing and re-initialising flash partition");
                if unsafe { nvs_flash_erase() } != ESP_OK {
                    return Err(StorageError::IoError);
                }
                if unsafe { nvs_flash_init() } != ESP_OK {
                    return Err(StorageError::IoError);
                }
            } else if ret != ESP_OK {
                return Err(StorageError::IoError);
            }
            info!("NvsHighScoreStore: ESP-IDF NVS initialised");
        }

        #[cfg(not(target_os = "espidf"))]
        info!("NvsHighScoreStore: simulation backend");

        Ok(Self {
            #[cfg(not(target_os = "espidf"))]
            slot: None,
        })
    }

    /// Simulation store that already holds `score`.
    #[cfg(not(target_os = "espidf"))]
    pub fn with_high_score(score: u8) -> Self {
        Self { slot: Some(score) }
    }

    /// Open the namespace, run `f` with the handle, close.
    #[cfg(target_os = "espidf")]
    fn with_nvs_handle<F, T>(write: bool, f: F) -> Result<T, esp_err_t>
    where
        F: FnOnce(nvs_handle_t) -> Result<T, esp_err_t>,
    {
        let mut handle: nvs_handle_t = 0;
        let mode = if write {
            nvs_open_mode_t_NVS_READWRITE
        } else {
            nvs_open_mode_t_NVS_READONLY
        };

        let ret = unsafe { nvs_open(NAMESPACE.as_ptr(), mode, &mut handle) };
        if ret != ESP_OK {
            return Err(ret);
        }

        let result = f(handle);
        unsafe {
            nvs_close(handle);
        }
        result
    }
}

impl HighScoreStore for NvsHighScoreStore {
    #[cfg(target_os = "espidf")]
    fn read_high_score(&self) -> Result<u8, StorageError> {
        let result = Self::with_nvs_handle(false, |handle| {
            let mut value: u8 = 0;
            let ret = unsafe { nvs_get_u8(handle, HIGH_SCORE_KEY.as_ptr(), &mut value) };
            if ret != ESP_OK {
                return Err(ret);
            }
            Ok(value)
        });
        match result {
            Ok(value) => Ok(value),
            // Neither the namespace nor the key exists before the first save.
            Err(ESP_ERR_NVS_NOT_FOUND) => Ok(0),
            Err(e) => {
                warn!("NVS: high score read failed: {}", e);
                Err(StorageError::IoError)
            }
        }
    }

    #[cfg(target_os = "espidf")]
    fn write_high_score(&mut self, score: u8) -> Result<(), StorageError> {
        let result = Self::with_nvs_handle(true, |handle| {
            let ret = unsafe { nvs_set_u8(handle, HIGH_SCORE_KEY.as_ptr(), score) };
            if ret != ESP_OK {
                return Err(ret);
            }
            let ret = unsafe { nvs_commit(handle) };
            if ret != ESP_OK {
                return Err(ret);
            }
            Ok(())
        });
        match result {
            Ok(()) => {
                info!("NVS: high score {} saved", score);
                Ok(())
            }
            Err(ESP_ERR_NVS_NOT_ENOUGH_SPACE) => Err(StorageError::Full),
            Err(e) => {
                warn!("NVS: high score write failed: {}", e);
                Err(StorageError::IoError)
            }
        }
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_high_score(&self) -> Result<u8, StorageError> {
        Ok(self.slot.unwrap_or(0))
    }

    #[cfg(not(target_os = "espidf"))]
    fn write_high_score(&mut self, score: u8) -> Result<(), StorageError> {
        self.slot = Some(score);
        info!("NVS(sim): high score {} saved", score);
        Ok(())
    }
}
