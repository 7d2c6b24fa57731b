use std::env;
use std::fs;

use anyhow::{Context, Result};
use query_editor::ast::SearchAst;
use query_editor::parser::QueryParser;

/// 内置示例查询及其对应的服务端 AST 载荷
const SAMPLE_QUERY: &str =
    "project: {Demo project}, HELP some project: Collaboration more State: Unresolved text";

const SAMPLE_AST_JSON: &str = r#"{
    "$type": "SearchAst",
    "expression": {
        "$type": "TermExpression",
        "terms": [
            {
                "$type": "CategorizedSearchTerm",
                "field": {"$type": "SearchField", "name": "project", "start": 0, "stop": 6},
                "values": [
                    {"$type": "AttributeSearchValue", "value": {"name": "Demo project"}, "minus": false},
                    {"$type": "AttributeSearchValue", "value": {"name": "HELP"}, "minus": false}
                ]
            },
            {"$type": "TextSearchTerm", "text": "some", "minus": false},
            {
                "$type": "CategorizedSearchTerm",
                "field": {"$type": "SearchField", "name": "project", "start": 35, "stop": 41},
                "values": [
                    {"$type": "AttributeSearchValue", "value": {"name": "Collaboration"}, "minus": false}
                ]
            },
            {"$type": "TextSearchTerm", "text": "more", "minus": false},
            {
                "$type": "CategorizedSearchTerm",
                "field": {"$type": "SearchField", "name": "State", "start": 63, "stop": 67},
                "values": [
                    {"$type": "AttributeSearchValue", "value": {"name": "Unresolved"}, "minus": false}
                ]
            },
            {"$type": "TextSearchTerm", "text": "text", "minus": false}
        ]
    }
}"#;

/// 含 OR 的载荷, 用于演示展平模型的降级信号
const OR_AST_JSON: &str = r#"{
    "$type": "SearchAst",
    "expression": {
        "$type": "LogicExpression",
        "operator": "OR",
        "left": {
            "$type": "TermExpression",
            "terms": [
                {
                    "$type": "CategorizedSearchTerm",
                    "field": {"name": "State"},
                    "values": [{"$type": "AttributeSearchValue", "value": {"name": "Open"}}]
                }
            ]
        },
        "right": {
            "$type": "TermExpression",
            "terms": [
                {
                    "$type": "CategorizedSearchTerm",
                    "field": {"name": "State"},
                    "values": [{"$type": "AttributeSearchValue", "value": {"name": "Reopened"}}]
                }
            ]
        }
    }
}"#;

fn main() -> Result<()> {
    println!("--- Query Editor: AST 到结构化模型的往返演示 ---");

    let (query, payload) = load_payload()?;

    // 步骤 1: 解码服务端返回的 AST JSON
    println!("\n[步骤 1]: 解码服务端 AST JSON...");
    let ast = SearchAst::from_json(&payload).context("无法解码 AST JSON")?;
    println!("✓ 解码成功");

    // 步骤 2: 遍历 AST, 展平为可编辑的结构化模型
    println!("\n[步骤 2]: 遍历 AST, 展平为结构化模型...");
    let parser = QueryParser::new(query, Some(&ast));
    let result = parser.result();
    println!(
        "✓ 收集到 {} 个字段对, {} 个裸标签",
        result.pairs.len(),
        result.singles.len()
    );
    println!("模型结构: {:#?}", result);
    if result.unsupported_complexity {
        println!("⚠️ 查询包含 OR, 展平模型无法完整还原, 调用方应回退到纯文本编辑");
    }

    // 步骤 3: 字段值读取, 即字段值编辑器看到的视图
    println!("\n[步骤 3]: 读取字段当前选中的值...");
    for field in ["project", "State"] {
        println!("  {} -> {:?}", field, parser.field_values(field));
    }

    // 步骤 4: 把模型重新编译为规范查询文本
    println!("\n[步骤 4]: 重新编译为规范查询文本...");
    println!("原始查询: {}", parser.source_query());
    println!("编译结果: {}", parser.compile());

    demonstrate_or_degradation();

    Ok(())
}

/// 读取命令行指定的 AST JSON 文件, 未指定时使用内置示例
fn load_payload() -> Result<(String, String)> {
    match env::args().nth(1) {
        Some(path) => {
            let payload = fs::read_to_string(&path)
                .with_context(|| format!("无法读取 AST 文件: {}", path))?;
            println!("✓ 从 {} 加载 AST 载荷", path);
            Ok((String::new(), payload))
        }
        None => {
            println!("未指定 AST 文件, 使用内置示例载荷");
            Ok((SAMPLE_QUERY.to_string(), SAMPLE_AST_JSON.to_string()))
        }
    }
}

fn demonstrate_or_degradation() {
    println!("\n--- OR 查询的降级处理演示 ---");

    match SearchAst::from_json(OR_AST_JSON) {
        Ok(ast) => {
            let parser = QueryParser::new("State: Open or State: Reopened", Some(&ast));
            let result = parser.result();
            println!("unsupported_complexity = {}", result.unsupported_complexity);
            println!("两个分支仍被合并: State -> {:?}", parser.field_values("State"));
            println!("重新编译 (有损): {}", parser.compile());
        }
        Err(e) => println!("✗ 示例载荷解码失败: {}", e),
    }
}
