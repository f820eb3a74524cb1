use molecule_codegen::{Compiler, Language};

const SCHEMAS: &[&str] = &["schemas/cobuild.mol", "schemas/spore.mol"];

fn main() {
    println!("cargo:rerun-if-changed=schemas/blockchain.mol");
    for schema in SCHEMAS {
        println!("cargo:rerun-if-changed={schema}");
        Compiler::new()
            .input_schema_file(schema)
            .generate_code(Language::Rust)
            .output_dir_set_default()
            .run()
            .unwrap_or_else(|e| panic!("failed to compile {schema}: {e}"));
    }
}
