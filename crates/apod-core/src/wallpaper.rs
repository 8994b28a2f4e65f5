//! Desktop wallpaper capability.
//!
//! The pipeline only knows the [`WallpaperSetter`] trait; the per-OS
//! mechanics live behind it so the orchestrator stays platform-neutral.

use anyhow::{bail, Context, Result};
use std::path::Path;

/// Applies an image file as the desktop background.
pub trait WallpaperSetter {
    /// Point the desktop background at `path` (path to an image file).
    fn set(&self, path: &Path) -> Result<()>;
}

/// Sets the wallpaper through the native desktop mechanism of the host OS.
pub struct DesktopWallpaper;

impl WallpaperSetter for DesktopWallpaper {
    fn set(&self, path: &Path) -> Result<()> {
        set_native(path)
    }
}

#[cfg(target_os = "linux")]
fn set_native(path: &Path) -> Result<()> {
    // GNOME; both keys so the image shows in light and dark mode.
    let uri = format!("file://{}", path.display());
    for key in ["picture-uri", "picture-uri-dark"] {
        let status = std::process::Command::new("gsettings")
            .args(["set", "org.gnome.desktop.background", key, &uri])
            .status()
            .context("run gsettings")?;
        if !status.success() {
            bail!("gsettings set {} exited with {}", key, status);
        }
    }
    Ok(())
}

#[cfg(target_os = "macos")]
fn set_native(path: &Path) -> Result<()> {
    let script = format!(
        r#"tell application "System Events" to set picture of every desktop to POSIX file "{}""#,
        path.display()
    );
    let status = std::process::Command::new("osascript")
        .args(["-e", &script])
        .status()
        .context("run osascript")?;
    if !status.success() {
        bail!("osascript exited with {}", status);
    }
    Ok(())
}

#[cfg(target_os = "windows")]
fn set_native(path: &Path) -> Result<()> {
    let script = windows_wallpaper_script(path);
    let status = std::process::Command::new("powershell")
        .args(["-NoProfile", "-NonInteractive", "-Command", &script])
        .status()
        .context("run powershell")?;
    if !status.success() {
        bail!("powershell exited with {}", status);
    }
    Ok(())
}

/// PowerShell that P/Invokes user32's `SystemParametersInfoW` with
/// `SPI_SETDESKWALLPAPER` (20). The 3 is
/// `SPIF_UPDATEINIFILE | SPIF_SENDCHANGE`, so the change persists and the
/// shell is notified.
#[cfg(any(target_os = "windows", test))]
fn windows_wallpaper_script(path: &Path) -> String {
    // PowerShell single-quoted literal: only ' needs escaping (doubled).
    let escaped = path.display().to_string().replace('\'', "''");
    format!(
        "Add-Type -Namespace Native -Name Desktop -MemberDefinition \
         '[DllImport(\"user32.dll\", CharSet = CharSet.Unicode)] public static extern int \
         SystemParametersInfoW(int uAction, int uParam, string lpvParam, int fuWinIni);'; \
         [Native.Desktop]::SystemParametersInfoW(20, 0, '{}', 3) | Out-Null",
        escaped
    )
}

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
fn set_native(_path: &Path) -> Result<()> {
    bail!("setting the desktop background is not supported on this platform")
}
