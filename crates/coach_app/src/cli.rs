use std::path::PathBuf;

use coach_api::JobFilters;

use crate::jobs::JobActionKind;

pub const HELP_TEXT: &str = "\
Comandos:
  /cv <arquivo.pdf>                  envia o currículo para análise
  /pdf <arquivo.pdf>                 inicia um plano de estudos a partir de um PDF
  /vagas [cargo;cidade;estado;modelo;tipo]   busca vagas pelos filtros
  /match [cargo]                     busca vagas com match no currículo
  /vaga <n> <fit|adaptar|carta>      ação sobre a n-ésima vaga listada
  /novo                              começa uma conversa nova
  /ajuda                             mostra esta ajuda
  /sair                              encerra
Qualquer outro texto é enviado ao chat (ou escolhe o foco durante o plano \
de estudos).";

/// One parsed input line of the terminal driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    Submit(String),
    FindJobs(JobFilters),
    MatchJobs { cargo: String },
    UploadCv(PathBuf),
    StudyPdf(PathBuf),
    JobAction { index: usize, kind: JobActionKind },
    NewChat,
    Help,
    Quit,
    Invalid(String),
}

pub fn parse_cli_line(line: &str) -> CliCommand {
    let trimmed = line.trim();
    if !trimmed.starts_with('/') {
        return CliCommand::Submit(trimmed.to_string());
    }

    let (command, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (trimmed, ""),
    };

    match command {
        "/ajuda" => CliCommand::Help,
        "/sair" => CliCommand::Quit,
        "/novo" => CliCommand::NewChat,
        "/cv" => path_command(rest, CliCommand::UploadCv, "/cv <arquivo.pdf>"),
        "/pdf" => path_command(rest, CliCommand::StudyPdf, "/pdf <arquivo.pdf>"),
        "/vagas" => CliCommand::FindJobs(parse_filters(rest)),
        "/match" => CliCommand::MatchJobs {
            cargo: rest.to_string(),
        },
        "/vaga" => parse_job_action(rest),
        unknown => CliCommand::Invalid(format!("Comando desconhecido: {unknown}")),
    }
}

fn path_command(
    rest: &str,
    build: impl FnOnce(PathBuf) -> CliCommand,
    usage: &str,
) -> CliCommand {
    if rest.is_empty() {
        return CliCommand::Invalid(format!("Uso: {usage}"));
    }
    build(PathBuf::from(rest))
}

fn parse_filters(rest: &str) -> JobFilters {
    let mut fields = rest.split(';').map(str::trim);
    JobFilters {
        cargo: fields.next().unwrap_or_default().to_string(),
        cidade: fields.next().unwrap_or_default().to_string(),
        estado: fields.next().unwrap_or_default().to_string(),
        modelo: fields.next().unwrap_or_default().to_string(),
        tipo: fields.next().unwrap_or_default().to_string(),
    }
}

fn parse_job_action(rest: &str) -> CliCommand {
    let usage = "Uso: /vaga <n> <fit|adaptar|carta>";
    let mut parts = rest.split_whitespace();
    let Some(index) = parts.next().and_then(|value| value.parse::<usize>().ok()) else {
        return CliCommand::Invalid(usage.to_string());
    };
    if index == 0 {
        return CliCommand::Invalid(usage.to_string());
    }

    let kind = match parts.next() {
        Some("fit" | "compatibilidade") => JobActionKind::Fit,
        Some("adaptar" | "adapt") => JobActionKind::Adapt,
        Some("carta" | "cover") => JobActionKind::Cover,
        _ => return CliCommand::Invalid(usage.to_string()),
    };

    CliCommand::JobAction { index, kind }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_submitted_to_the_chat() {
        assert_eq!(
            parse_cli_line("como negociar salário?"),
            CliCommand::Submit("como negociar salário?".to_string())
        );
    }

    #[test]
    fn filters_split_on_semicolons_with_missing_fields_blank() {
        let command = parse_cli_line("/vagas Engenheiro de Dados;Recife;PE");
        let CliCommand::FindJobs(filters) = command else {
            panic!("expected find-jobs command");
        };

        assert_eq!(filters.cargo, "Engenheiro de Dados");
        assert_eq!(filters.cidade, "Recife");
        assert_eq!(filters.estado, "PE");
        assert_eq!(filters.modelo, "");
        assert_eq!(filters.tipo, "");
    }

    #[test]
    fn job_action_requires_one_based_index_and_known_action() {
        assert_eq!(
            parse_cli_line("/vaga 2 carta"),
            CliCommand::JobAction {
                index: 2,
                kind: JobActionKind::Cover,
            }
        );
        assert!(matches!(parse_cli_line("/vaga 0 fit"), CliCommand::Invalid(_)));
        assert!(matches!(
            parse_cli_line("/vaga 1 demitir"),
            CliCommand::Invalid(_)
        ));
    }

    #[test]
    fn path_commands_require_an_argument() {
        assert!(matches!(parse_cli_line("/cv"), CliCommand::Invalid(_)));
        assert_eq!(
            parse_cli_line("/cv cv.pdf"),
            CliCommand::UploadCv(PathBuf::from("cv.pdf"))
        );
    }

    #[test]
    fn unknown_slash_commands_are_reported() {
        assert!(matches!(parse_cli_line("/nope"), CliCommand::Invalid(_)));
    }
}
