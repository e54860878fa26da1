use comfy_table::{Cell, Color, Row};
use console::style;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, mpsc};
use std::thread;
use std::time::Duration;
use tracing::{info, warn};

use crate::cleaner::{
    CleanOptions, CleanupEvent, expand_inputs, preview_policy, run_cleanup_with_sender,
    verify_image_clean,
};
use crate::cli::{Cli, CleanArgs, Command, CompareArgs, InspectArgs, PolicyArgs};
use crate::config::Settings;
use crate::detect::detect_file_kind;
use crate::error::{CleanError, Result};
use crate::exiftool::{MetadataTool, edit_arguments, group_by_category, removed_tags};
use crate::formatting::{format_size, truncate_value};
use crate::logger::{LogBuffer, init_tracing};
use crate::policy::{FieldCategory, PolicyResult, classify_tag, resolve};
use crate::ui;

const VALUE_WIDTH: usize = 60;

pub fn run(cli: Cli) -> Result<()> {
    let buffer = LogBuffer::new();
    init_tracing(cli.verbose, &buffer)?;

    let settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    let result = match &cli.command {
        Command::Policy(args) => show_policy(args, &settings),
        Command::Clean(args) => clean(args, &settings),
        Command::Inspect(args) => inspect(args, &settings),
        Command::Compare(args) => compare(args, &settings),
    };

    if cli.show_log {
        ui::print_section("Registro");
        for line in buffer.snapshot() {
            ui::print_line(&line);
        }
        ui::close_section();
    }

    result
}

fn show_policy(args: &PolicyArgs, settings: &Settings) -> Result<()> {
    let options = args.rules.clean_options(settings);
    let kind = match (&args.kind, &args.path) {
        (Some(kind), _) => *kind,
        (None, Some(path)) => detect_file_kind(path),
        (None, None) => {
            return Err(CleanError::Config(
                "Indica un archivo o un tipo con --kind".to_string(),
            ));
        }
    };
    let policy = resolve(kind, options.mode, &options.overrides);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&policy)?);
        return Ok(());
    }

    let subject = args
        .path
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| kind.label().to_string());
    println!(
        "\n{} {} {}",
        style("Política para").cyan().bold(),
        style(subject).white().bold(),
        style(format!("({} · modo {})", kind.label(), options.mode.label())).dim()
    );
    println!("{}", ui::policy_table(&policy));

    let arguments = edit_arguments(&policy);
    if !arguments.is_empty() {
        println!(
            "{} {}",
            style("ExifTool ›").dim(),
            style(arguments.join(" ")).dim()
        );
    }
    Ok(())
}

fn clean(args: &CleanArgs, settings: &Settings) -> Result<()> {
    let mut options = args.rules.clean_options(settings);
    options.overwrite |= args.overwrite;

    let files = expand_inputs(&args.paths, args.recursive || settings.recursive)?;
    if files.is_empty() {
        ui::print_warning("No hay archivos compatibles para limpiar");
        return Ok(());
    }

    let timeout = match args.timeout {
        Some(0) => None,
        Some(seconds) => Some(Duration::from_secs(seconds)),
        None => settings.timeout(),
    };

    let tool = settings.exiftool().with_deadline(timeout);
    let version = tool.version()?;
    info!(program = %tool.program().display(), %version, "ExifTool disponible");

    if options.overwrite && settings.confirm_overwrite && !args.yes && !confirm_overwrite(files.len())? {
        warn!("sobrescritura cancelada, se generarán copias limpias");
        options.overwrite = false;
    }

    ui::render_header();
    let (sender, receiver) = mpsc::channel();
    let worker_options = options.clone();
    let worker = thread::spawn(move || {
        run_cleanup_with_sender(Arc::new(tool), files, &worker_options, timeout, sender)
    });

    for event in receiver.iter() {
        report_event(&event, args.verify, &options);
    }

    if worker.join().is_err() {
        ui::print_failure("La limpieza por lote terminó inesperadamente");
    }
    Ok(())
}

fn report_event(event: &CleanupEvent, verify: bool, options: &CleanOptions) {
    match event {
        CleanupEvent::Started { total } => {
            ui::print_section(&format!("Limpiando {total} archivo(s)"));
        }
        CleanupEvent::Processing { index, total, path } => {
            ui::print_line(&format!("[{index}/{total}] {}", path.display()));
        }
        CleanupEvent::Success {
            path,
            output,
            message,
            output_size,
        } => {
            ui::print_success(&format!(
                "{message} → {} ({})",
                output.display(),
                format_size(*output_size)
            ));
            if verify {
                report_verification(path, output, options);
            }
        }
        CleanupEvent::Failure { path, error } => {
            ui::print_failure(&format!("{}: {error}", path.display()));
        }
        CleanupEvent::Finished {
            successes,
            failures,
        } => {
            ui::print_line(&format!("Correctos: {successes} · Fallidos: {failures}"));
            ui::close_section();
        }
    }
}

fn report_verification(source: &Path, output: &Path, options: &CleanOptions) {
    let policy = preview_policy(source, options);
    match verify_image_clean(output, &policy) {
        Ok(leftovers) if leftovers.is_empty() => {}
        Ok(leftovers) => {
            let names: Vec<&str> = leftovers.iter().map(|category| category.label()).collect();
            ui::print_warning(&format!("Persisten campos de: {}", names.join(", ")));
        }
        Err(error) => ui::print_warning(&format!("No se pudo verificar: {error}")),
    }
}

fn confirm_overwrite(count: usize) -> io::Result<bool> {
    print!(
        "{} ",
        style(format!(
            "Se sobrescribirán {count} archivo(s) original(es). ¿Continuar? [s/N]"
        ))
        .yellow()
    );
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "s" | "si" | "sí" | "y" | "yes"))
}

fn inspect(args: &InspectArgs, settings: &Settings) -> Result<()> {
    let options = args.rules.clean_options(settings);
    let tool = settings.exiftool();
    let tags = tool.read(&args.path)?;
    let policy = preview_policy(&args.path, &options);

    let mut table = ui::base_table();
    table.set_header(vec![
        ui::header_cell("Categoría"),
        ui::header_cell("Etiqueta"),
        ui::header_cell("Valor"),
        ui::header_cell("Acción"),
    ]);

    for (category, entries) in group_by_category(&tags) {
        for (tag, value) in entries {
            table.add_row(Row::from(vec![
                Cell::new(category.label()).fg(Color::Cyan),
                Cell::new(tag),
                Cell::new(truncate_value(value, VALUE_WIDTH)),
                policy_cell(&policy, category),
            ]));
        }
    }

    println!(
        "\n{} {} {}",
        style("Metadata de").cyan().bold(),
        style(args.path.display()).white().bold(),
        style(format!("({} etiquetas)", tags.len())).dim()
    );
    println!("{table}");
    Ok(())
}

fn policy_cell(policy: &PolicyResult, category: FieldCategory) -> Cell {
    match policy.action_for(category) {
        Some(action) => ui::action_cell(action),
        None => Cell::new("No aplica").fg(Color::DarkGrey),
    }
}

fn compare(args: &CompareArgs, settings: &Settings) -> Result<()> {
    let tool = settings.exiftool();
    let before = tool.read(&args.original)?;
    let after = tool.read(&args.cleaned)?;
    let removed = removed_tags(&before, &after);

    if removed.is_empty() {
        ui::print_warning("No se eliminó ni modificó ninguna etiqueta");
        return Ok(());
    }

    let mut table = ui::base_table();
    table.set_header(vec![
        ui::header_cell("Categoría"),
        ui::header_cell("Etiqueta eliminada"),
        ui::header_cell("Valor original"),
    ]);
    for (tag, value) in &removed {
        table.add_row(Row::from(vec![
            Cell::new(classify_tag(tag).label()).fg(Color::Cyan),
            Cell::new(tag),
            Cell::new(truncate_value(value, VALUE_WIDTH)).fg(Color::Yellow),
        ]));
    }

    println!(
        "\n{} {}",
        style("Etiquetas eliminadas:").cyan().bold(),
        style(removed.len()).white().bold()
    );
    println!("{table}");
    Ok(())
}
