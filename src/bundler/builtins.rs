/// Node.js builtin module names, used to pick the right hint when an import
/// cannot be resolved: builtins don't exist on the web, so "install the
/// package" would point users the wrong way.
const NODE_BUILTINS: &[&str] = &[
    "assert",
    "async_hooks",
    "buffer",
    "child_process",
    "cluster",
    "console",
    "constants",
    "crypto",
    "dgram",
    "diagnostics_channel",
    "dns",
    "domain",
    "events",
    "fs",
    "http",
    "http2",
    "https",
    "inspector",
    "module",
    "net",
    "os",
    "path",
    "perf_hooks",
    "process",
    "punycode",
    "querystring",
    "readline",
    "repl",
    "stream",
    "string_decoder",
    "sys",
    "timers",
    "tls",
    "trace_events",
    "tty",
    "url",
    "util",
    "v8",
    "vm",
    "worker_threads",
    "zlib",
];

/// Whether an import specifier names a Node.js builtin module.
///
/// Handles the "node:" scheme and subpath imports like "fs/promises".
pub fn is_node_builtin(specifier: &str) -> bool {
    let specifier = specifier.strip_prefix("node:").unwrap_or(specifier);
    let root = specifier.split('/').next().unwrap_or(specifier);
    NODE_BUILTINS.contains(&root)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_builtin() {
        assert!(is_node_builtin("fs"));
        assert!(is_node_builtin("path"));
    }

    #[test]
    fn test_node_scheme_and_subpath() {
        assert!(is_node_builtin("node:fs"));
        assert!(is_node_builtin("fs/promises"));
        assert!(is_node_builtin("node:stream/web"));
    }

    #[test]
    fn test_packages_are_not_builtins() {
        assert!(!is_node_builtin("lodash-es"));
        assert!(!is_node_builtin("@scope/pkg"));
        assert!(!is_node_builtin("./relative"));
    }
}
