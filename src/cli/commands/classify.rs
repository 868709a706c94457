use crate::domain::Platform;
use crate::services::{classify, is_hospitality_business, is_trade_business};

pub fn cmd_classify(name: &str, types: &[String]) {
    let category = classify(name, types);

    println!("{name}");
    println!("{:-<50}", "");
    println!("  Category:    {category}");
    let yes_no = |flag: bool| if flag { "yes" } else { "no" };
    println!("  Trade:       {}", yes_no(is_trade_business(name, types)));
    println!(
        "  Hospitality: {}",
        yes_no(is_hospitality_business(name, types))
    );

    let plan: Vec<&str> = Platform::plan_for(category)
        .iter()
        .map(Platform::key)
        .collect();
    println!("  Platforms:   {}", plan.join(", "));
}
