//! Shared test utilities for integration tests
//!
//! Builds a miniature asmjit-style source tree in a temporary directory and
//! serializes access to the environment variables the config loader reads.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tablegen::config::TableGenConfig;
use tempfile::TempDir;

/// Global mutex to serialize environment variable access across all tests
static ENV_MUTEX: Mutex<()> = Mutex::new(());

pub const INSTDB_CPP: &str = "src/asmjit/arm/a64instdb.cpp";
pub const INSTDB_H: &str = "src/asmjit/arm/a64instdb.h";
pub const INSTDB_P_H: &str = "src/asmjit/arm/a64instdb_p.h";
pub const GLOBALS_H: &str = "src/asmjit/arm/a64globals.h";
pub const EMITTER_H: &str = "src/asmjit/arm/a64emitter.h";

pub const DATABASE: &str = concat!(
    "  INST(None, None, (_), 0, 0, 0, 0),\n",
    "  INST(Adc, BaseRRR, (0b0001101000000000000000, kWX, kZR, 0), kRWI_W, 0, 0, 0),\n",
    "  INST(Add, BaseAddSub, (0b0001011000, 0b0001000100, 0b0001011001), kRWI_W, 0, 0, 0),\n",
    "  INST(Adds, BaseAddSub, (0b0101011000, 0b0101000100, 0b0101011001), kRWI_W, 0, 0, 0),\n",
    "  INST(Ld1_v, SimdLdNStruct, (0b0000110001000000011100), kRWI_LDn, F(Consecutive), 0, 0),\n",
    "  INST(Nop, BaseOp, (_), 0, 0, 0, 0)\n",
);

pub fn instdb_cpp(database: &str) -> String {
    format!(
        "\
#include \"a64instdb_p.h\"

namespace asmjit {{
namespace a64 {{

#define INST(id, opcode, opData, rwInfo, instFlags, opcodeDataIndex, nameDataIndex) \\
  {{ uint32_t(kEncoding##opcode), opcodeDataIndex, 0, nameDataIndex, rwInfo, instFlags }}

const InstDB::InstInfo InstDB::_instInfoTable[] = {{
  // ${{InstInfo:Begin}}
{database}  // ${{InstInfo:End}}
}};

#undef INST

namespace EncodingData {{

// ${{EncodingData:Begin}}
// ${{EncodingData:End}}

}} // {{EncodingData}}

// ${{NameData:Begin}}
// ${{NameData:End}}

}} // {{a64}}
}} // {{asmjit}}
"
    )
}

pub const INSTDB_H_TEXT: &str = "\
namespace InstDB {

// ${NameLimits:Begin}
// ${NameLimits:End}

} // {InstDB}
";

pub const INSTDB_P_H_TEXT: &str = "\
namespace InstDB {

// ${EncodingId:Begin}
// ${EncodingId:End}

namespace EncodingData {

// ${EncodingDataForward:Begin}
// ${EncodingDataForward:End}

} // {EncodingData}
} // {InstDB}
";

pub const GLOBALS_H_TEXT: &str = "\
struct Inst {
  //! Instruction id.
  enum Id : uint32_t {
    // ${InstId:Begin}
    // ${InstId:End}
  };
};
";

pub const EMITTER_H_TEXT: &str = "class EmitterExplicitT {};\n";

pub const ISA_TOML: &str = r#"
[[instruction]]
name = "adc"
arch = "A64"
encoding = "A64"
extensions = ["BASE"]

[[instruction]]
name = "ld1"
arch = "A64"
encoding = "A64"
extensions = ["ASIMD"]

[[instruction]]
name = "add"
arch = "A32"
encoding = "A32"
extensions = ["ARMv6"]
"#;

/// A temporary source tree holding every file the default configuration loads.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self::with_database(DATABASE)
    }

    pub fn with_database(database: &str) -> Self {
        let workspace = Self {
            dir: TempDir::new().unwrap(),
        };
        workspace.write(INSTDB_CPP, &instdb_cpp(database));
        workspace.write(INSTDB_H, INSTDB_H_TEXT);
        workspace.write(INSTDB_P_H, INSTDB_P_H_TEXT);
        workspace.write(GLOBALS_H, GLOBALS_H_TEXT);
        workspace.write(EMITTER_H, EMITTER_H_TEXT);
        workspace
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.dir.path().join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(relative)).unwrap()
    }

    /// Contents of every configured file, in configuration order.
    pub fn snapshot(&self) -> Vec<(PathBuf, String)> {
        TableGenConfig::default()
            .database
            .files
            .iter()
            .map(|f| {
                let text = std::fs::read_to_string(self.dir.path().join(f)).unwrap();
                (f.clone(), text)
            })
            .collect()
    }
}

/// Run `f` with XDG_CONFIG_HOME and HOME pointing into `test_dir`.
pub fn with_xdg_config<F, R>(test_dir: &TempDir, f: F) -> R
where
    F: FnOnce() -> R,
{
    with_xdg_config_env(test_dir, &[], f)
}

/// Like [`with_xdg_config`], with extra environment variables set for the
/// duration of `f`. Every variable is restored afterwards.
pub fn with_xdg_config_env<F, R>(test_dir: &TempDir, vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());

    let test_home = test_dir.path().join("home");
    std::fs::create_dir_all(&test_home).unwrap();
    let test_home = test_home.to_str().unwrap().to_string();
    let config_home = test_dir.path().to_str().unwrap().to_string();

    let mut all: Vec<(&str, &str)> = vec![
        ("HOME", test_home.as_str()),
        ("XDG_CONFIG_HOME", config_home.as_str()),
    ];
    all.extend_from_slice(vars);

    let saved: Vec<_> = all
        .iter()
        .map(|(key, _)| (key.to_string(), std::env::var(key).ok()))
        .collect();
    for (key, value) in &all {
        std::env::set_var(key, value);
    }

    let result = f();

    for (key, value) in saved {
        match value {
            Some(value) => std::env::set_var(&key, value),
            None => std::env::remove_var(&key),
        }
    }
    result
}
