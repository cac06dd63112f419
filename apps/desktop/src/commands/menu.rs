//! # Menu Commands
//!
//! The application menu: its items and what each one does.
//!
//! ```text
//! File
//! ├── Nueva factura              Ctrl+N   → reset draft, date, suggestion
//! ├── Eliminar todos los productos        → clear products only
//! └── Salir                      Ctrl+Q   → exit
//! DevTools (development builds only)
//! └── Mostrar/Ocultar            Ctrl+D   → toggle developer tools
//! ```

use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ApiError, ApiResult};
use crate::state::{ConfigState, DraftState};
use factura_core::DraftSnapshot;

/// Actions reachable from the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MenuCommand {
    NewInvoice,
    ClearProducts,
    Exit,
    ToggleDevTools,
}

/// One entry of the menu as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub group: &'static str,
    pub label: &'static str,
    pub accelerator: Option<&'static str>,
    pub command: MenuCommand,
}

/// Result of running a menu command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MenuOutcome {
    /// The draft changed; re-render from this snapshot.
    Draft { snapshot: DraftSnapshot },
    /// The front end should close.
    Exit,
    /// Developer tools visibility after the toggle.
    DevTools { visible: bool },
}

/// Visibility of the developer tools for this session.
#[derive(Debug, Default)]
pub struct DevToolsState {
    visible: AtomicBool,
}

impl DevToolsState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::Relaxed)
    }

    fn toggle(&self) -> bool {
        !self.visible.fetch_xor(true, Ordering::Relaxed)
    }
}

/// Menu entries for this build; the DevTools group only outside production.
pub fn menu_items(config: &ConfigState) -> Vec<MenuItem> {
    let exit_accelerator = if cfg!(target_os = "macos") {
        "Command+Q"
    } else {
        "Ctrl+Q"
    };

    let mut items = vec![
        MenuItem {
            group: "File",
            label: "Nueva factura",
            accelerator: Some("Ctrl+N"),
            command: MenuCommand::NewInvoice,
        },
        MenuItem {
            group: "File",
            label: "Eliminar todos los productos",
            accelerator: None,
            command: MenuCommand::ClearProducts,
        },
        MenuItem {
            group: "File",
            label: "Salir",
            accelerator: Some(exit_accelerator),
            command: MenuCommand::Exit,
        },
    ];

    if config.dev_tools_enabled() {
        items.push(MenuItem {
            group: "DevTools",
            label: "Mostrar/Ocultar herramientas de desarrollo",
            accelerator: Some(if cfg!(target_os = "macos") {
                "Command+D"
            } else {
                "Ctrl+D"
            }),
            command: MenuCommand::ToggleDevTools,
        });
    }

    items
}

/// Runs a menu command.
///
/// `ToggleDevTools` is rejected in production builds.
pub fn handle_menu(
    command: MenuCommand,
    draft: &DraftState,
    config: &ConfigState,
    dev_tools: &DevToolsState,
) -> ApiResult<MenuOutcome> {
    debug!(?command, "menu command");

    match command {
        MenuCommand::NewInvoice => {
            let snapshot = draft.with_draft_mut(|d| {
                d.reset();
                d.products.snapshot()
            });
            info!("Draft reset for a new invoice");
            Ok(MenuOutcome::Draft { snapshot })
        }
        MenuCommand::ClearProducts => {
            let snapshot = draft.with_draft_mut(|d| {
                d.products.clear();
                d.products.snapshot()
            });
            Ok(MenuOutcome::Draft { snapshot })
        }
        MenuCommand::Exit => {
            info!("Exit requested from menu");
            Ok(MenuOutcome::Exit)
        }
        MenuCommand::ToggleDevTools => {
            if !config.dev_tools_enabled() {
                return Err(ApiError::validation(
                    "Herramientas de desarrollo no disponibles",
                ));
            }
            Ok(MenuOutcome::DevTools {
                visible: dev_tools.toggle(),
            })
        }
    }
}
