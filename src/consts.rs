//! Parameter tables and fixed identifiers
//!
//! Each entry pairs a parameter name with the data column it occupies in the
//! do_x3dna text output (column 0 is the base-pair/step number). Parameters
//! with no column are only available from HDF5 storage.

pub const BASE_PAIR_PARAMETERS: [(&str, Option<usize>); 30] = [
    // Local base-pair parameters (L-BP_*.dat)
    ("shear", Some(1)),
    ("stretch", Some(2)),
    ("stagger", Some(3)),
    ("buckle", Some(4)),
    ("propeller", Some(5)),
    ("opening", Some(6)),
    // Backbone and chi dihedrals, strand I
    ("alpha s-1", Some(1)),
    ("beta s-1", Some(2)),
    ("gamma s-1", Some(3)),
    ("delta s-1", Some(4)),
    ("epsilon s-1", Some(5)),
    ("zeta s-1", Some(6)),
    ("chi s-1", Some(7)),
    // Backbone and chi dihedrals, strand II
    ("alpha s-2", Some(8)),
    ("beta s-2", Some(9)),
    ("gamma s-2", Some(10)),
    ("delta s-2", Some(11)),
    ("epsilon s-2", Some(12)),
    ("zeta s-2", Some(13)),
    ("chi s-2", Some(14)),
    // Helical radius
    ("radius s-1", Some(1)),
    ("radius s-2", Some(4)),
    // Local helical axis
    ("helical x-axis", Some(1)),
    ("helical y-axis", Some(2)),
    ("helical z-axis", Some(3)),
    // Global axis analysis, HDF5 only
    ("helical x-axis smooth", None),
    ("helical y-axis smooth", None),
    ("helical z-axis smooth", None),
    ("helical axis curvature", None),
    ("helical axis tangent", None),
];

pub const BASE_STEP_PARAMETERS: [(&str, Option<usize>); 16] = [
    // Local base-step parameters (L-BPS_*.dat)
    ("shift", Some(1)),
    ("slide", Some(2)),
    ("rise", Some(3)),
    ("tilt", Some(4)),
    ("roll", Some(5)),
    ("twist", Some(6)),
    // Local base-step helical parameters (L-BPH_*.dat)
    ("x-disp", Some(1)),
    ("y-disp", Some(2)),
    ("h-rise", Some(3)),
    ("inclination", Some(4)),
    ("tip", Some(5)),
    ("h-twist", Some(6)),
    // Groove widths (MGroove_*.dat)
    ("minor groove", Some(1)),
    ("minor groove refined", Some(2)),
    ("major groove", Some(3)),
    ("major groove refined", Some(4)),
];

/// Gromacs 4.x name; Gromacs 5 and later ship it as `gmx analyze`.
pub const DEFAULT_TOOL: &str = "g_analyze";

/// Any usable Gromacs analysis tool carries this in its name.
pub const TOOL_KEYWORD: &str = "analyze";

pub const HDF5_EXTENSIONS: [&str; 3] = ["h5", "hdf5", "hdf"];

/// Smallest number of frames the statistical tool accepts.
pub const MIN_TOOL_FRAMES: usize = 2;
