//! Static checks on submitted code.  Nothing here executes guest code.
//!
//! The denylist catches the obvious escape attempts with a precise error;
//! the allowlist in [`scope`](crate::scope) is what actually closes the
//! boundary, since a module can only link functions the host defines.

use wasmtime::{Engine, ExternType, Module};

use crate::scope::is_host_function;
use crate::{SandboxConfig, SandboxError, SandboxResult};

/// Name of the guest's entry point.
pub const ENTRY: &str = "decide";

/// Import modules that are refused outright.  Anything starting with
/// `wasi` is refused as well.
pub const DENIED_MODULES: &[&str] = &[
    "os", "sys", "subprocess", "shutil", "builtins", "importlib", "fs", "process", "net", "socket",
];

/// Function names refused regardless of the module they come from.
pub const DENIED_CALLS: &[&str] = &[
    "open", "eval", "exec", "input", "exit", "quit", "proc_exit", "path_open", "fd_read",
    "fd_write", "system", "spawn", "compile",
];

pub fn is_denied_module(module: &str) -> bool {
    module.starts_with("wasi") || DENIED_MODULES.contains(&module)
}

pub fn is_denied_call(name: &str) -> bool {
    DENIED_CALLS.contains(&name)
}

/// Size and emptiness checks, then WAT → wasm.
pub fn parse(code: &str, cfg: &SandboxConfig) -> SandboxResult<Vec<u8>> {
    if code.trim().is_empty() {
        return Err(SandboxError::Empty);
    }
    if code.len() > cfg.max_code_bytes {
        return Err(SandboxError::TooLarge { len: code.len(), max: cfg.max_code_bytes });
    }
    wat::parse_str(code).map_err(|e| SandboxError::Syntax(e.to_string()))
}

/// Compile `wasm` and check its imports and entry point.
pub fn compile(engine: &Engine, wasm: &[u8]) -> SandboxResult<Module> {
    let module = Module::from_binary(engine, wasm).map_err(|e| SandboxError::Invalid(e.to_string()))?;
    check_imports(&module)?;
    check_entry(&module)?;
    Ok(module)
}

fn check_imports(module: &Module) -> SandboxResult<()> {
    for import in module.imports() {
        let (m, n) = (import.module(), import.name());
        let owned = || (m.to_owned(), n.to_owned());
        if is_denied_module(m) {
            let (module, name) = owned();
            return Err(SandboxError::DeniedModule { module, name });
        }
        if is_denied_call(n) {
            let (module, name) = owned();
            return Err(SandboxError::DeniedCall { module, name });
        }
        if !is_host_function(m, n) {
            let (module, name) = owned();
            return Err(SandboxError::UnknownImport { module, name });
        }
    }
    Ok(())
}

fn check_entry(module: &Module) -> SandboxResult<()> {
    match module.get_export(ENTRY) {
        Some(ExternType::Func(_)) => Ok(()),
        _ => Err(SandboxError::MissingEntry),
    }
}
