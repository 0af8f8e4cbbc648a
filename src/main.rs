use screenplay_forge::{export_screenplay, parse, Conf, ExportBody, ExportFormat, Screenplay};
use std::env;
use std::fs;
use std::path::Path;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "screenplay_forge=info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: {} <input.json|input.fountain> [format] [output]", args[0]);
        println!("format: fountain | fdx | rtf | docx | pdf | txt");
        return;
    }

    let input_path = Path::new(&args[1]);
    let format = ExportFormat::parse(args.get(2).map(String::as_str));

    let content = match fs::read_to_string(input_path) {
        Ok(content) => content,
        Err(e) => {
            error!("读取文件失败: {}", e);
            return;
        }
    };

    // JSON 按完整剧本读取，其余按 Fountain 导入
    let screenplay = if input_path.extension().map_or(false, |ext| ext == "json") {
        match serde_json::from_str::<Screenplay>(&content) {
            Ok(mut screenplay) => {
                screenplay.ensure_element_ids();
                screenplay
            }
            Err(e) => {
                error!("剧本 JSON 无效: {}", e);
                return;
            }
        }
    } else {
        parse(&content).into_screenplay("local")
    };

    let config = Conf::default();
    let exported = match export_screenplay(&screenplay, format, &config) {
        Ok(exported) => exported,
        Err(e) => {
            error!("导出失败: {}", e);
            return;
        }
    };

    match args.get(3) {
        Some(output) => {
            if let Err(e) = fs::write(output, exported.body.as_bytes()) {
                error!("写入文件失败: {}", e);
                return;
            }
            info!("导出完成: {} ({})", output, exported.content_type);
        }
        None => match &exported.body {
            ExportBody::Text(text) => println!("{}", text),
            ExportBody::Bytes(_) => {
                let output = exported.filename.clone();
                if let Err(e) = fs::write(&output, exported.body.as_bytes()) {
                    error!("写入文件失败: {}", e);
                    return;
                }
                info!("导出完成: {}", output);
            }
        },
    }
}
