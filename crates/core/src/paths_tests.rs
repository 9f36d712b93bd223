// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::path::Path;

fn paths() -> Paths {
    Paths {
        config_dir: PathBuf::from("/c"),
        cache_dir: PathBuf::from("/k"),
        state_dir: PathBuf::from("/s"),
    }
}

#[test]
fn layout() {
    let paths = paths();
    assert_eq!(paths.settings_path(), Path::new("/c/settings.toml"));
    assert_eq!(paths.identity().certificate(), Path::new("/c/certificate.pem"));
    assert_eq!(paths.identity().private_key(), Path::new("/c/private.pem"));
    assert_eq!(paths.device_cache_dir("abc"), Path::new("/k/abc"));
    assert_eq!(paths.bus().socket_path(), Path::new("/s/bus.sock"));
    assert_eq!(paths.log_path(), Path::new("/s/daemon.log"));
}
