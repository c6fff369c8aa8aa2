//! 内置旧版操作模块
//!
//! 十个领域的旧版操作目录（camelCase 扁平记录），
//! 由覆盖率分析器触发一次性批量迁移，也供导出入口使用。

use once_cell::sync::Lazy;
use serde_json::{Value, json};
use tracing::debug;

use crate::error::RegistryError;
use crate::migration::{LegacyModule, MigrationReport, migrate_module};
use crate::registry::SemanticRegistry;

/// 各领域模块源（模块名 → 旧版导出）
static BUILTIN_MODULE_SOURCES: Lazy<Vec<(&'static str, Value)>> = Lazy::new(|| {
    vec![
        ("math", math_module()),
        ("vector", vector_module()),
        ("logic", logic_module()),
        ("data", data_module()),
        ("string", string_module()),
        ("color", color_module()),
        ("geometry", geometry_module()),
        ("solver", solver_module()),
        ("workflow", workflow_module()),
        ("command", command_module()),
    ]
});

/// 分类后的内置模块列表
pub fn builtin_modules() -> Vec<(&'static str, LegacyModule)> {
    BUILTIN_MODULE_SOURCES
        .iter()
        .map(|(name, source)| (*name, LegacyModule::classify(source)))
        .collect()
}

/// 批量迁移并注册全部内置模块
///
/// 重复 id 的注册失败被逐条跳过（已注册的操作保持不变），
/// 使重复装载幂等；其余注册错误向上传播。
pub fn register_builtin_modules(
    registry: &mut SemanticRegistry,
) -> crate::error::Result<MigrationReport> {
    let mut report = MigrationReport::default();
    for (name, module) in builtin_modules() {
        report.modules += 1;
        for op in migrate_module(&module) {
            report.operations_converted += 1;
            match registry.register_operation(op) {
                Ok(()) => report.operations_registered += 1,
                Err(RegistryError::DuplicateEntity { id, .. }) => {
                    debug!(module = name, op_id = %id, "操作已注册，跳过");
                    report.duplicates_skipped += 1;
                }
                Err(other) => return Err(other),
            }
        }
    }
    Ok(report)
}

fn math_module() -> Value {
    json!([
        {"id": "math.add", "domain": "math", "name": "Add", "category": "arithmetic",
         "tags": ["arithmetic"], "pure": true, "deterministic": true, "complexity": "O(1)"},
        {"id": "math.subtract", "domain": "math", "name": "Subtract", "category": "arithmetic",
         "tags": ["arithmetic"], "pure": true, "deterministic": true, "complexity": "O(1)"},
        {"id": "math.multiply", "domain": "math", "name": "Multiply", "category": "arithmetic",
         "tags": ["arithmetic"], "pure": true, "deterministic": true, "complexity": "O(1)"},
        {"id": "math.divide", "domain": "math", "name": "Divide", "category": "arithmetic",
         "tags": ["arithmetic"], "pure": true, "deterministic": true, "complexity": "O(1)"},
        {"id": "math.sin", "domain": "math", "name": "Sine", "category": "trig",
         "tags": ["trig"], "pure": true, "deterministic": true},
        {"id": "math.cos", "domain": "math", "name": "Cosine", "category": "trig",
         "tags": ["trig"], "pure": true, "deterministic": true},
        {"id": "math.clamp", "domain": "math", "name": "Clamp", "category": "range",
         "tags": ["range"], "pure": true, "deterministic": true},
        {"id": "math.random", "domain": "math", "name": "Random", "category": "range",
         "tags": ["range", "random"], "pure": true, "deterministic": false},
    ])
}

fn vector_module() -> Value {
    json!([
        {"id": "vector.add", "domain": "vector", "name": "Vector Add", "category": "algebra",
         "tags": ["algebra"], "pure": true, "deterministic": true},
        {"id": "vector.cross", "domain": "vector", "name": "Cross Product", "category": "algebra",
         "tags": ["algebra"], "pure": true, "deterministic": true},
        {"id": "vector.dot", "domain": "vector", "name": "Dot Product", "category": "algebra",
         "tags": ["algebra"], "pure": true, "deterministic": true},
        {"id": "vector.normalize", "domain": "vector", "name": "Normalize", "category": "algebra",
         "tags": ["algebra"], "pure": true, "deterministic": true},
        {"id": "vector.lerp", "domain": "vector", "name": "Lerp", "category": "interpolation",
         "tags": ["interpolation"], "pure": true, "deterministic": true},
    ])
}

fn logic_module() -> Value {
    json!([
        {"id": "logic.and", "domain": "logic", "name": "And", "category": "boolean",
         "tags": ["boolean"], "pure": true, "deterministic": true},
        {"id": "logic.or", "domain": "logic", "name": "Or", "category": "boolean",
         "tags": ["boolean"], "pure": true, "deterministic": true},
        {"id": "logic.not", "domain": "logic", "name": "Not", "category": "boolean",
         "tags": ["boolean"], "pure": true, "deterministic": true},
        {"id": "logic.select", "domain": "logic", "name": "Select", "category": "branch",
         "tags": ["branch"], "pure": true, "deterministic": true},
    ])
}

fn data_module() -> Value {
    json!([
        {"id": "data.sort", "domain": "data", "name": "Sort", "category": "list",
         "tags": ["list", "order"], "pure": true, "deterministic": true, "complexity": "O(n log n)"},
        {"id": "data.filter", "domain": "data", "name": "Filter", "category": "list",
         "tags": ["list"], "pure": true, "deterministic": true, "complexity": "O(n)"},
        {"id": "data.map", "domain": "data", "name": "Map", "category": "list",
         "tags": ["list"], "pure": true, "deterministic": true, "complexity": "O(n)"},
        {"id": "data.flatten", "domain": "data", "name": "Flatten", "category": "tree",
         "tags": ["tree"], "pure": true, "deterministic": true},
        {"id": "data.graft", "domain": "data", "name": "Graft", "category": "tree",
         "tags": ["tree"], "pure": true, "deterministic": true},
        {"id": "data.shuffle", "domain": "data", "name": "Shuffle", "category": "list",
         "tags": ["list", "random"], "pure": true, "deterministic": false},
    ])
}

fn string_module() -> Value {
    json!([
        {"id": "string.concat", "domain": "string", "name": "Concat", "category": "compose",
         "tags": ["text"], "pure": true, "deterministic": true},
        {"id": "string.split", "domain": "string", "name": "Split", "category": "decompose",
         "tags": ["text"], "pure": true, "deterministic": true},
        {"id": "string.format", "domain": "string", "name": "Format", "category": "compose",
         "tags": ["text"], "pure": true, "deterministic": true},
        {"id": "string.case", "domain": "string", "name": "Change Case", "category": "transform",
         "tags": ["text"], "pure": true, "deterministic": true},
    ])
}

fn color_module() -> Value {
    json!([
        {"id": "color.rgb", "domain": "color", "name": "From RGB", "category": "construct",
         "tags": ["color"], "pure": true, "deterministic": true},
        {"id": "color.hsl", "domain": "color", "name": "From HSL", "category": "construct",
         "tags": ["color"], "pure": true, "deterministic": true},
        {"id": "color.lerp", "domain": "color", "name": "Blend", "category": "interpolation",
         "tags": ["color", "interpolation"], "pure": true, "deterministic": true},
        {"id": "color.hex", "domain": "color", "name": "To Hex", "category": "convert",
         "tags": ["color", "text"], "pure": true, "deterministic": true},
    ])
}

fn geometry_module() -> Value {
    json!([
        {"id": "geom.extrude", "domain": "geometry", "name": "Extrude", "category": "solid",
         "tags": ["solid"], "pure": true, "deterministic": true, "cost": "medium"},
        {"id": "geom.loft", "domain": "geometry", "name": "Loft", "category": "surface",
         "tags": ["surface"], "pure": true, "deterministic": true, "cost": "medium"},
        {"id": "geom.boolean_union", "domain": "geometry", "name": "Boolean Union",
         "category": "solid", "tags": ["solid", "boolean"], "pure": true, "deterministic": true,
         "cost": "high"},
        {"id": "geom.boolean_difference", "domain": "geometry", "name": "Boolean Difference",
         "category": "solid", "tags": ["solid", "boolean"], "pure": true, "deterministic": true,
         "cost": "high"},
        {"id": "geom.offset", "domain": "geometry", "name": "Offset Curve", "category": "curve",
         "tags": ["curve"], "pure": true, "deterministic": true},
        {"id": "geom.fillet", "domain": "geometry", "name": "Fillet", "category": "solid",
         "tags": ["solid"], "pure": true, "deterministic": true},
        {"id": "geom.pipe", "domain": "geometry", "name": "Pipe", "category": "solid",
         "tags": ["solid"], "pure": true, "deterministic": true},
        {"id": "geom.lattice_panel", "domain": "geometry", "name": "Lattice Panel",
         "category": "pattern", "tags": ["pattern"], "pure": true, "deterministic": true,
         "cost": "high", "dependencies": ["geom.boolean_difference"]},
        {"id": "geom.slot_cut", "domain": "geometry", "name": "Slot Cut", "category": "pattern",
         "tags": ["pattern"], "pure": true, "deterministic": true,
         "dependencies": ["geom.boolean_difference"]},
    ])
}

fn solver_module() -> Value {
    json!([
        {"id": "solver.run", "domain": "solver", "name": "Run Solver", "category": "simulate",
         "tags": ["simulate"], "pure": false, "deterministic": false, "cost": "high"},
        {"id": "solver.add_goal", "domain": "solver", "name": "Add Goal", "category": "setup",
         "tags": ["setup"], "pure": false, "deterministic": true},
        {"id": "solver.reset", "domain": "solver", "name": "Reset Solver", "category": "setup",
         "tags": ["setup"], "pure": false, "deterministic": true},
    ])
}

fn workflow_module() -> Value {
    json!([
        {"id": "workflow.save", "domain": "workflow", "name": "Save Document", "category": "io",
         "tags": ["io"], "pure": false, "deterministic": true, "sideEffects": ["filesystem"]},
        {"id": "workflow.export_mesh", "domain": "workflow", "name": "Export Mesh",
         "category": "io", "tags": ["io", "mesh"], "pure": false, "deterministic": true,
         "sideEffects": ["filesystem"]},
        {"id": "workflow.fetch_asset", "domain": "workflow", "name": "Fetch Asset",
         "category": "io", "tags": ["io"], "pure": false, "deterministic": false,
         "sideEffects": ["network"]},
        {"id": "workflow.undo", "domain": "workflow", "name": "Undo", "category": "history",
         "tags": ["history"], "pure": false, "deterministic": true},
        {"id": "workflow.log", "domain": "workflow", "name": "Log Message", "category": "debug",
         "tags": ["debug"], "pure": false, "deterministic": true, "sideEffects": ["console"]},
    ])
}

fn command_module() -> Value {
    json!([
        {"id": "command.delete", "domain": "command", "name": "Delete Selection",
         "category": "edit", "tags": ["edit"], "pure": false, "deterministic": true,
         "sideEffects": ["scene"]},
        {"id": "command.bake", "domain": "command", "name": "Bake Geometry", "category": "edit",
         "tags": ["edit"], "pure": false, "deterministic": true, "sideEffects": ["scene"]},
        {"id": "command.copy", "domain": "command", "name": "Copy to Clipboard",
         "category": "edit", "tags": ["edit"], "pure": false, "deterministic": true,
         "sideEffects": ["clipboard"]},
    ])
}
