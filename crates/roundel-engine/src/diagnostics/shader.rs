use std::fmt;

/// Where WGSL processing stopped.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DiagnosticStage {
    Parse,
    Validate,
}

/// Compile log for a shader that failed to parse or validate.
#[derive(Debug, Clone)]
pub struct ShaderDiagnostic {
    pub label: String,
    pub stage: DiagnosticStage,
    /// Human-readable report with source excerpts.
    pub log: String,
}

impl fmt::Display for ShaderDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self.stage {
            DiagnosticStage::Parse => "parse",
            DiagnosticStage::Validate => "validation",
        };
        write!(f, "shader '{}' {stage} error:\n{}", self.label, self.log)
    }
}

impl std::error::Error for ShaderDiagnostic {}

/// Parses and validates WGSL on the CPU before it reaches the device.
///
/// wgpu treats an invalid shader module as an uncaptured device error; this
/// turns the same failure into a loggable value.
pub fn validate_wgsl(label: &str, source: &str) -> Result<(), ShaderDiagnostic> {
    let module = naga::front::wgsl::parse_str(source).map_err(|e| ShaderDiagnostic {
        label: label.to_string(),
        stage: DiagnosticStage::Parse,
        log: e.emit_to_string(source),
    })?;

    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::default(),
    )
    .validate(&module)
    .map_err(|e| ShaderDiagnostic {
        label: label.to_string(),
        stage: DiagnosticStage::Validate,
        log: e.emit_to_string(source),
    })?;

    Ok(())
}
