use pilot_core::catalog::{self, CategoryInfo};
use pilot_core::model::Category;

pub fn list_categories() {
    for category in Category::ALL {
        println!("{:<22} {}", category, catalog::info(category).name);
    }
}

pub fn execute(category: Option<Category>) {
    match category {
        Some(category) => print!("{}", card(catalog::info(category))),
        None => {
            for category in Category::ALL {
                let info = catalog::info(category);
                println!("{} ({category})\n  {}\n", info.name, info.formula);
            }
        }
    }
}

fn card(info: &CategoryInfo) -> String {
    let mut out = format!(
        "{}\n{}\n\nFormula: {}\n\nExample: {}\n",
        info.name, info.description, info.formula, info.example.problem
    );
    for (i, step) in info.example.steps.iter().enumerate() {
        out.push_str(&format!("  {}. {}  ({})\n", i + 1, step.step, step.explanation));
    }
    out.push_str(&format!("Answer: {}\n", info.example.answer));
    if let Some(tip) = info.example.tip {
        out.push_str(&format!("Tip: {tip}\n"));
    }
    out
}
