//! Tracked Python dependencies.

use std::fmt;
use std::str::FromStr;

/// PyTorch wheel index for the CUDA 11.8 builds.
pub const TORCH_CU118_INDEX: &str = "https://download.pytorch.org/whl/cu118";

/// A dependency of the VapourSynth environment that the checker inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Library {
    /// The interpreter itself.
    Python,
    /// Numeric array library; 2.x breaks VapourSynth.
    NumPy,
    /// Tensor library, CUDA 11.8 build.
    Torch,
    /// Video-graph plugin framework.
    VapourSynth,
}

impl Library {
    /// All tracked libraries, in check order.
    pub const ALL: [Library; 4] = [
        Library::Python,
        Library::NumPy,
        Library::Torch,
        Library::VapourSynth,
    ];

    /// Key used in config files and the Python import statement.
    pub fn key(&self) -> &'static str {
        match self {
            Library::Python => "python",
            Library::NumPy => "numpy",
            Library::Torch => "torch",
            Library::VapourSynth => "vapoursynth",
        }
    }

    /// Human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Library::Python => "Python",
            Library::NumPy => "NumPy",
            Library::Torch => "PyTorch",
            Library::VapourSynth => "VapourSynth",
        }
    }

    /// Whether absence is an ERROR rather than a WARN.
    pub fn is_mandatory(&self) -> bool {
        !matches!(self, Library::Torch)
    }

    /// The version this environment is pinned to.
    pub fn pinned_version(&self) -> &'static str {
        match self {
            Library::Python => "3.12",
            Library::NumPy => "1.26.4",
            Library::Torch => "2.7.0+cu118",
            Library::VapourSynth => "R72",
        }
    }

    /// How to install the pinned version.
    pub fn install_hint(&self) -> String {
        match self {
            Library::Python => "install Python 3.12 from https://www.python.org".to_string(),
            Library::NumPy => "pip install numpy==1.26.4".to_string(),
            Library::Torch => format!(
                "pip install torch==2.7.0+cu118 torchvision torchaudio --index-url {}",
                TORCH_CU118_INDEX
            ),
            Library::VapourSynth => "pip install vapoursynth==72".to_string(),
        }
    }
}

impl fmt::Display for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Library {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "python" => Ok(Library::Python),
            "numpy" => Ok(Library::NumPy),
            "torch" | "pytorch" => Ok(Library::Torch),
            "vapoursynth" => Ok(Library::VapourSynth),
            _ => Err(format!("unknown library: {}", s)),
        }
    }
}
