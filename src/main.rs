use clap::{Parser, ValueEnum};
use miette::{bail, IntoDiagnostic, Result};

use rowsift::render::{self, MySql, Oracle};
use rowsift::{parse, FieldDescriptors, ValueType};

/// Parse a SQL-flavored row filter rule and print the resulting tree.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// rule expression, e.g. "amount > 10 and status = 'open'"
    rule: String,

    /// field type declaration, NAME:TYPE with TYPE one of string, number,
    /// date, bool; repeatable
    #[arg(short, long = "field", value_name = "NAME:TYPE")]
    fields: Vec<String>,

    /// render the parsed rule back to SQL for a dialect
    #[arg(short, long, value_enum)]
    dialect: Option<DialectArg>,

    /// print the parsed tree as JSON
    #[cfg(feature = "serde")]
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DialectArg {
    Oracle,
    Mysql,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut fields = FieldDescriptors::new();
    for declaration in &args.fields {
        let Some((name, ty)) = declaration.split_once(':') else {
            bail!("field declaration '{declaration}' is not NAME:TYPE");
        };
        let ty: ValueType = ty.parse().into_diagnostic()?;
        fields.insert(name, ty);
    }

    let tree = parse(&args.rule, &fields)?;

    #[cfg(feature = "serde")]
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&tree).into_diagnostic()?
        );
        return Ok(());
    }

    match args.dialect {
        Some(DialectArg::Oracle) => println!("{}", render::to_sql(&tree, &Oracle)),
        Some(DialectArg::Mysql) => println!("{}", render::to_sql(&tree, &MySql)),
        None => println!("{tree:#?}"),
    }
    Ok(())
}
