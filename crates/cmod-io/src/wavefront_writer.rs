use std::io::Write;

use cmod_core::{BlendMode, DiagnosticSink, Result, TextureSemantic, Warning};
use cmod_wavefront::WavefrontMesh;

/// Emits an assembled mesh as a Wavefront OBJ/MTL pair.
///
/// Material `i` is named `materialN` with `N = i` in both files, which is
/// how the geometry's `usemtl` statements line up with the library.
pub struct WavefrontWriter {
    mesh: WavefrontMesh,
}

impl WavefrontWriter {
    pub fn new(mesh: WavefrontMesh) -> Self {
        Self { mesh }
    }

    pub fn mesh(&self) -> &WavefrontMesh {
        &self.mesh
    }

    /// Writes the material library. Features the MTL format cannot express
    /// (non-normal blend modes, more than one texture kind) are reported to
    /// `sink` and dropped.
    pub fn write_mtl<W: Write>(&self, writer: &mut W, sink: &mut dyn DiagnosticSink) -> Result<()> {
        for (index, material) in self.mesh.materials().iter().enumerate() {
            writeln!(writer, "newmtl material{index}")?;
            if let Some(diffuse) = material.diffuse {
                writeln!(writer, "Kd {diffuse}")?;
            }
            if let Some(emissive) = material.emissive {
                writeln!(writer, "Ka {emissive}")?;
            }
            if let Some(specular) = material.specular {
                writeln!(writer, "Ks {specular}")?;
            }
            if let Some(power) = material.specular_power {
                writeln!(writer, "Ns {power}")?;
            }
            if let Some(opacity) = material.opacity {
                writeln!(writer, "d {opacity}")?;
            }

            if material
                .blend_mode
                .map_or(false, |mode| mode != BlendMode::Normal)
            {
                sink.warning(Warning::BlendModeUnsupported);
            }
            if material.texture_count() > 1 {
                sink.warning(Warning::MultiTexturing);
            }

            if let Some(path) = material.texture(TextureSemantic::Diffuse) {
                writeln!(writer, "map_Kd {path}")?;
            }
            if let Some(path) = material.texture(TextureSemantic::Emissive) {
                writeln!(writer, "map_Ka {path}")?;
            }
            if let Some(path) = material.texture(TextureSemantic::Specular) {
                writeln!(writer, "map_Ks {path}")?;
            }
        }
        Ok(())
    }

    /// Writes the geometry file. `mtl_reference` is the path recorded in
    /// the `mtllib` statement, usually relative to the OBJ's directory.
    pub fn write_obj<W: Write>(&self, writer: &mut W, mtl_reference: &str) -> Result<()> {
        writeln!(writer, "mtllib {mtl_reference}")?;

        for position in self.mesh.positions() {
            writeln!(writer, "v {position}")?;
        }
        for tex_coord in self.mesh.tex_coords() {
            writeln!(writer, "vt {tex_coord}")?;
        }
        for normal in self.mesh.normals() {
            writeln!(writer, "vn {normal}")?;
        }

        for (material_index, primitives) in self.mesh.primitive_groups() {
            writeln!(writer, "usemtl material{material_index}")?;
            for primitive in primitives {
                write!(writer, "{}", primitive.category.command())?;
                for vertex in &primitive.vertices {
                    write!(writer, " {vertex}")?;
                }
                writeln!(writer)?;
            }
        }
        Ok(())
    }
}
