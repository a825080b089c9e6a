//! Generates synthetic array-literal configs of specified line counts for benchmarking

pub fn generate_config(target_lines: usize) -> Vec<String> {
    let mut lines = Vec::with_capacity(target_lines + 8);

    // Header and block opener
    lines.push("<?php".to_string());
    lines.push(String::new());
    lines.push("return [".to_string());

    let mut section_num = 0;
    while lines.len() + 2 < target_lines {
        lines.push(format!("    'section{}' => [", section_num));

        // Fill the section, leaving room for its closer and the block closer
        let remaining = target_lines.saturating_sub(lines.len() + 2);
        let values_in_section = remaining.clamp(1, 12);
        for i in 0..values_in_section {
            let val_id = section_num * 12 + i;
            let line = match i % 6 {
                0 => format!("        'enabled{}' => {},", val_id, val_id % 2 == 0),
                1 => format!("        'port{}' => {},", val_id, 8000 + val_id),
                2 => format!(
                    "        'host{}' => env('HOST_{}', 'localhost'),",
                    val_id, val_id
                ),
                3 => format!("        'name{}' => 'service-{}',", val_id, val_id),
                4 => format!(
                    "        'handler{}' => App\\Handlers\\Handler{}::class,",
                    val_id, val_id
                ),
                5 => format!("        'drivers{}' => ['file', 'redis'],", val_id),
                _ => unreachable!(),
            };
            lines.push(line);
        }

        lines.push("    ],".to_string());
        lines.push(String::new());
        section_num += 1;
    }

    lines.push("];".to_string());
    lines
}
