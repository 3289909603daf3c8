// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_source(sections: usize, depth: usize) -> String {
    let mut content = String::new();

    for section in 0..sections {
        content.push_str(&format!("// #region Section {section}\n"));
        content.push_str(&generate_nested_regions(depth, 1));
        content.push_str("// #endregion\n\n");
    }

    content
}

#[allow(dead_code)]
fn generate_nested_regions(remaining_depth: usize, level: usize) -> String {
    if remaining_depth == 0 {
        return String::new();
    }

    let indent = "    ".repeat(level);
    let mut content = String::new();

    content.push_str(&format!("{indent}// #region Level {level}\n"));
    for i in 0..5 {
        content.push_str(&format!("{indent}fn item_{level}_{i}() {{ let region = {i}; }}\n"));
    }
    content.push_str(&generate_nested_regions(remaining_depth - 1, level + 1));
    content.push_str(&format!("{indent}// #endregion ends Level {level}\n"));

    content
}

#[allow(dead_code)]
pub fn generate_malformed_source(sections: usize) -> String {
    let mut content = String::new();
    for section in 0..sections {
        if section % 3 == 0 {
            content.push_str("// #endregion stray\n");
        }
        content.push_str(&format!("// #region Open {section}\nlet x = 1;\n"));
    }
    content
}
