//! Host and version details for bug reports.

use std::path::Path;

use sysinfo::System;

/// Snapshot of the running environment.
#[derive(Debug, Clone)]
pub struct DebugReport {
    pub app_version: &'static str,
    pub os: String,
    pub kernel: String,
    pub host: String,
    pub arch: &'static str,
    pub config_path: Option<String>,
    pub terminal_size: Option<(u16, u16)>,
}

impl DebugReport {
    /// Query the system. Unknown values are reported as `unknown`.
    pub fn collect(config_path: Option<&Path>, terminal_size: Option<(u16, u16)>) -> Self {
        let unknown = || "unknown".to_string();
        let os = System::long_os_version()
            .or_else(|| {
                let name = System::name()?;
                Some(match System::os_version() {
                    Some(version) => format!("{name} {version}"),
                    None => name,
                })
            })
            .unwrap_or_else(unknown);

        Self {
            app_version: env!("CARGO_PKG_VERSION"),
            os,
            kernel: System::kernel_version().unwrap_or_else(unknown),
            host: System::host_name().unwrap_or_else(unknown),
            arch: std::env::consts::ARCH,
            config_path: config_path.map(|p| p.display().to_string()),
            terminal_size,
        }
    }

    /// Report as `label: value` lines.
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("glyphrain: {}", self.app_version),
            format!("os: {}", self.os),
            format!("kernel: {}", self.kernel),
            format!("arch: {}", self.arch),
            format!("host: {}", self.host),
            format!(
                "config: {}",
                self.config_path.as_deref().unwrap_or("none (not saved)")
            ),
            format!(
                "terminal: {}",
                self.terminal_size
                    .map(|(w, h)| format!("{w}x{h}"))
                    .unwrap_or_else(|| "unknown".to_string())
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_lines() {
        let report = DebugReport::collect(Some(Path::new("/tmp/glyphrain.toml")), Some((120, 40)));
        let lines = report.lines();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], format!("glyphrain: {}", env!("CARGO_PKG_VERSION")));
        assert!(lines.iter().any(|l| l == "config: /tmp/glyphrain.toml"));
        assert!(lines.iter().any(|l| l == "terminal: 120x40"));
        assert!(!report.os.is_empty());
    }

    #[test]
    fn test_report_without_config() {
        let report = DebugReport::collect(None, None);
        let lines = report.lines();
        assert!(lines.iter().any(|l| l == "config: none (not saved)"));
        assert!(lines.iter().any(|l| l == "terminal: unknown"));
    }
}
