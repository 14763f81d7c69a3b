//! The GAG command set.
//!
//! Every command forwards to one [`Controller`](crate::controller::Controller)
//! operation. The table in [`gag_commands`] fixes each command's argument shape
//! and help text once, at startup.

use crate::command::{ArgShape, CommandDescriptor, CommandRegistry, Invocation, Reply};
use anyhow::Result;

const BANNER: &str = r"
   ____    _    ____
  / ___|  / \  / ___|
 | |  _  / _ \| |  _
 | |_| |/ ___ \ |_| |
  \____/_/   \_\____|
";

/// Banner printed when the console starts.
pub fn greeting() -> String {
    format!("{BANNER}\nWelcome to the GAG console!\nType 'help' for available commands.\n")
}

const HELP_BARFFOLDER: &str = "Usage: barffolder <directory>

Writes gff, fasta and trinotate files to the specified directory.";

const HELP_LOADFOLDER: &str = "Usage: loadfolder [directory]

Reads in a gff, fasta and trinotate file from the specified directory.
If no directory is supplied, uses current working directory.";

const HELP_EXIT: &str = "Exit this console.";

const HELP_SETFILTERARG: &str = "Usage: setfilterarg <filter_name> <filter_arg> <value>

Sets a specified filter argument to a specified value.";

const HELP_GETFILTERARG: &str = "Usage: getfilterarg <filter_name> <filter_arg>

Outputs the value of the specified filter argument.";

const HELP_APPLYFILTERS: &str = "Applies all filters to the genome.";

const HELP_GETFILTERHELP: &str = "Usage: getfilterhelp [filter_name]

Gets help for a filter. Omit filter name to list info for all filters.";

const HELP_STATUS: &str = "Usage: status

Gives a brief summary of what's in memory.";

const HELP_DUCTTAPE: &str = "Usage: ducttape

For the genome in memory, does the following:
\t* Renames all 'maker' mRNAs, starting with '<locus_tag>_1000000'
\t* Removes each first CDS segment if its length is less than 4
\t* Verifies all start and stop codons against the actual sequence,
\t  creating new features as necessary
\t* Verifies the frame of every coding sequence with a six-frame translation
\t  checked against the protein stored in the annotation file
\t* Removes invalid features: first any mRNA with no CDS, then any gene
\t  with no mRNAs";

const HELP_REMOVEGENE: &str = "Usage: removegene <gene_id_prefix>

Removes from genome all genes with said gene_id prefix.";

const HELP_SUBSETGENOME: &str = "Usage: subsetgenome <sequence_id> [other sequence_ids...]

Removes all sequences (and corresponding genes) except those specified.";

const HELP_TRIMREGION: &str = "Usage: trimregion <seq_id> <start_index> <stop_index>

Removes subsequence from fasta and adjusts indices of features which follow region.";

const HELP_REMOVESEQ: &str = "Usage: removeseq <seq_id> [-F]

Removes sequence from fasta, only if the sequence contains no features
or if the -F option is used.";

const HELP_INVALIDATEREGION: &str = "Usage: invalidateregion <seq_id> <start> <stop>

Truncates or removes any feature located on region to be invalidated.";

const HELP_BARFGENEGFF: &str = "Usage: barfgenegff <gene_id>

Prints gff entry for corresponding gene to console.";

const HELP_BARFSEQ: &str = "Usage: barfseq <seq_id> <start_index> <end_index>

Prints (sub)sequence to console.";

const HELP_BARFCDSSEQ: &str = "Usage: barfcdsseq <mrna_id>

Prints the whole sequence of an mRNA's CDS.";

const HELP_BARFGENETBL: &str = "Usage: barfgenetbl <gene_id>

Prints the feature table entry for corresponding gene to console.";

const HELP_STATS: &str = "Usage: stats

Prints summary statistics about original genome (from file) and modified
genome (filters applied). May take a moment to run.";

const HELP_WRITETBL: &str = "Usage: writetbl <file_name>

Writes a feature table to the specified file.";

const HELP_HELP: &str = "Usage: help [command]

Lists available commands, or shows help for one command.";

/// Registry holding every GAG console command.
pub fn gag_commands() -> CommandRegistry {
    use ArgShape::{Line, None, Tokens};
    CommandRegistry::builder()
        .register(CommandDescriptor::new("barffolder", Line, barffolder).with_help(HELP_BARFFOLDER))
        .register(CommandDescriptor::new("loadfolder", Line, loadfolder).with_help(HELP_LOADFOLDER))
        .register(CommandDescriptor::new("exit", None, exit).with_help(HELP_EXIT))
        .register(
            CommandDescriptor::new("setfilterarg", Tokens, setfilterarg)
                .with_help(HELP_SETFILTERARG),
        )
        .register(
            CommandDescriptor::new("getfilterarg", Tokens, getfilterarg)
                .with_help(HELP_GETFILTERARG),
        )
        .register(
            CommandDescriptor::new("applyfilters", None, applyfilters)
                .with_help(HELP_APPLYFILTERS),
        )
        .register(
            CommandDescriptor::new("getfilterhelp", Line, getfilterhelp)
                .with_help(HELP_GETFILTERHELP),
        )
        .register(CommandDescriptor::new("barf", Line, barf))
        .register(CommandDescriptor::new("status", None, status).with_help(HELP_STATUS))
        .register(CommandDescriptor::new("barftofile", Line, barftofile))
        .register(CommandDescriptor::new("ducttape", None, ducttape).with_help(HELP_DUCTTAPE))
        .register(CommandDescriptor::new("removemrna", Line, removemrna))
        .register(CommandDescriptor::new("removegene", Line, removegene).with_help(HELP_REMOVEGENE))
        .register(
            CommandDescriptor::new("subsetgenome", Tokens, subsetgenome)
                .with_help(HELP_SUBSETGENOME),
        )
        .register(CommandDescriptor::new("trimregion", Tokens, trimregion).with_help(HELP_TRIMREGION))
        .register(CommandDescriptor::new("removeseq", Tokens, removeseq).with_help(HELP_REMOVESEQ))
        .register(
            CommandDescriptor::new("invalidateregion", Tokens, invalidateregion)
                .with_help(HELP_INVALIDATEREGION),
        )
        .register(
            CommandDescriptor::new("barfgenegff", Line, barfgenegff).with_help(HELP_BARFGENEGFF),
        )
        .register(CommandDescriptor::new("barfseq", Tokens, barfseq).with_help(HELP_BARFSEQ))
        .register(CommandDescriptor::new("barfcdsseq", Line, barfcdsseq).with_help(HELP_BARFCDSSEQ))
        .register(
            CommandDescriptor::new("barfgenetbl", Line, barfgenetbl).with_help(HELP_BARFGENETBL),
        )
        .register(CommandDescriptor::new("stats", None, stats).with_help(HELP_STATS))
        .register(CommandDescriptor::new("writetbl", Line, writetbl).with_help(HELP_WRITETBL))
        .register(CommandDescriptor::new("help", Line, help).with_help(HELP_HELP))
        .build()
}

fn barffolder(inv: Invocation<'_>) -> Result<Reply> {
    inv.controller.barf_folder(inv.args.line()).map(Reply::from)
}

fn loadfolder(inv: Invocation<'_>) -> Result<Reply> {
    inv.controller.load_folder(inv.args.line()).map(Reply::from)
}

fn exit(_inv: Invocation<'_>) -> Result<Reply> {
    Ok(Reply::Exit)
}

fn setfilterarg(inv: Invocation<'_>) -> Result<Reply> {
    inv.controller.set_filter_arg(inv.args.tokens()).map(Reply::from)
}

fn getfilterarg(inv: Invocation<'_>) -> Result<Reply> {
    inv.controller.get_filter_arg(inv.args.tokens()).map(Reply::from)
}

fn applyfilters(inv: Invocation<'_>) -> Result<Reply> {
    inv.controller.apply_filters().map(Reply::from)
}

fn getfilterhelp(inv: Invocation<'_>) -> Result<Reply> {
    let text = inv.controller.get_filter_help(inv.args.line().trim())?;
    Ok(Reply::Output(format!("\n{text}\n")))
}

fn barf(inv: Invocation<'_>) -> Result<Reply> {
    inv.controller.barf(inv.args.line()).map(Reply::from)
}

fn status(inv: Invocation<'_>) -> Result<Reply> {
    inv.controller.status().map(Reply::from)
}

fn barftofile(inv: Invocation<'_>) -> Result<Reply> {
    inv.controller.barf_to_file(inv.args.line()).map(Reply::from)
}

fn ducttape(inv: Invocation<'_>) -> Result<Reply> {
    inv.controller.ducttape().map(Reply::from)
}

fn removemrna(inv: Invocation<'_>) -> Result<Reply> {
    inv.controller.remove_mrna(inv.args.line()).map(Reply::from)
}

fn removegene(inv: Invocation<'_>) -> Result<Reply> {
    inv.controller.remove_gene(inv.args.line()).map(Reply::from)
}

fn subsetgenome(inv: Invocation<'_>) -> Result<Reply> {
    inv.controller.subset_genome(inv.args.tokens()).map(Reply::from)
}

fn trimregion(inv: Invocation<'_>) -> Result<Reply> {
    inv.controller.trim_region(inv.args.tokens()).map(Reply::from)
}

fn removeseq(inv: Invocation<'_>) -> Result<Reply> {
    inv.controller.remove_seq(inv.args.tokens()).map(Reply::from)
}

fn invalidateregion(inv: Invocation<'_>) -> Result<Reply> {
    inv.controller.invalidate_region(inv.args.tokens()).map(Reply::from)
}

fn barfgenegff(inv: Invocation<'_>) -> Result<Reply> {
    inv.controller.barf_gene_gff(inv.args.line()).map(Reply::from)
}

fn barfseq(inv: Invocation<'_>) -> Result<Reply> {
    inv.controller.barf_seq(inv.args.tokens()).map(Reply::from)
}

fn barfcdsseq(inv: Invocation<'_>) -> Result<Reply> {
    inv.controller.barf_cds_seq(inv.args.line()).map(Reply::from)
}

fn barfgenetbl(inv: Invocation<'_>) -> Result<Reply> {
    inv.controller.barf_gene_tbl(inv.args.line()).map(Reply::from)
}

fn stats(inv: Invocation<'_>) -> Result<Reply> {
    inv.controller.stats().map(Reply::from)
}

fn writetbl(inv: Invocation<'_>) -> Result<Reply> {
    inv.controller.write_tbl(inv.args.line()).map(Reply::from)
}

fn help(inv: Invocation<'_>) -> Result<Reply> {
    let topic = inv.args.line().trim();
    if topic.is_empty() {
        return Ok(Reply::Output(command_overview(inv.registry)));
    }
    let text = match inv.registry.lookup(topic).and_then(CommandDescriptor::help) {
        Some(text) => text.to_string(),
        None => format!("*** No help on {topic}"),
    };
    Ok(Reply::Output(text))
}

const OVERVIEW_WIDTH: usize = 80;

/// Names of all commands, split into those with and without help text.
fn command_overview(registry: &CommandRegistry) -> String {
    let (documented, undocumented): (Vec<_>, Vec<_>) =
        registry.iter().partition(|descriptor| descriptor.help().is_some());

    let mut sections = Vec::new();
    for (header, group) in [
        ("Documented commands (type help <topic>):", documented),
        ("Undocumented commands:", undocumented),
    ] {
        if group.is_empty() {
            continue;
        }
        let names: Vec<&str> = group.iter().map(|descriptor| descriptor.name()).collect();
        sections.push(format!(
            "{header}\n{}\n{}",
            "=".repeat(header.len()),
            columnize(&names, OVERVIEW_WIDTH)
        ));
    }
    sections.join("\n\n")
}

/// Lay names out left to right in equally wide columns.
fn columnize(names: &[&str], width: usize) -> String {
    let column = names.iter().map(|name| name.len()).max().unwrap_or(0) + 2;
    let per_row = (width / column).max(1);
    names
        .chunks(per_row)
        .map(|row| {
            row.iter()
                .map(|name| format!("{name:<column$}"))
                .collect::<String>()
                .trim_end()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Invocation;
    use crate::controller::{Controller, DetachedController};

    /// Records every call as `operation(args)` and answers with the same text.
    #[derive(Default)]
    struct RecordingController {
        calls: Vec<String>,
    }

    impl RecordingController {
        fn note(&mut self, call: String) -> Result<String> {
            self.calls.push(call.clone());
            Ok(call)
        }
    }

    impl Controller for RecordingController {
        fn load_folder(&mut self, path: &str) -> Result<()> {
            self.note(format!("load_folder({path})")).map(|_| ())
        }
        fn barf_folder(&mut self, path: &str) -> Result<String> {
            self.note(format!("barf_folder({path})"))
        }
        fn set_filter_arg(&mut self, tokens: &[&str]) -> Result<()> {
            self.note(format!("set_filter_arg({tokens:?})")).map(|_| ())
        }
        fn get_filter_arg(&mut self, tokens: &[&str]) -> Result<String> {
            self.note(format!("get_filter_arg({tokens:?})"))
        }
        fn apply_filters(&mut self) -> Result<()> {
            self.note("apply_filters()".to_string()).map(|_| ())
        }
        fn get_filter_help(&mut self, filter: &str) -> Result<String> {
            self.note(format!("get_filter_help({filter})"))
        }
        fn barf(&mut self, line: &str) -> Result<String> {
            self.note(format!("barf({line})"))
        }
        fn status(&mut self) -> Result<String> {
            self.note("status()".to_string())
        }
        fn barf_to_file(&mut self, path: &str) -> Result<()> {
            self.note(format!("barf_to_file({path})")).map(|_| ())
        }
        fn ducttape(&mut self) -> Result<()> {
            self.note("ducttape()".to_string()).map(|_| ())
        }
        fn remove_mrna(&mut self, mrna_id: &str) -> Result<()> {
            self.note(format!("remove_mrna({mrna_id})")).map(|_| ())
        }
        fn remove_gene(&mut self, prefix: &str) -> Result<()> {
            self.note(format!("remove_gene({prefix})")).map(|_| ())
        }
        fn subset_genome(&mut self, seq_ids: &[&str]) -> Result<String> {
            self.note(format!("subset_genome({seq_ids:?})"))
        }
        fn trim_region(&mut self, tokens: &[&str]) -> Result<String> {
            self.note(format!("trim_region({tokens:?})"))
        }
        fn remove_seq(&mut self, tokens: &[&str]) -> Result<()> {
            self.note(format!("remove_seq({tokens:?})")).map(|_| ())
        }
        fn invalidate_region(&mut self, tokens: &[&str]) -> Result<String> {
            self.note(format!("invalidate_region({tokens:?})"))
        }
        fn barf_gene_gff(&mut self, gene_id: &str) -> Result<String> {
            self.note(format!("barf_gene_gff({gene_id})"))
        }
        fn barf_seq(&mut self, tokens: &[&str]) -> Result<String> {
            self.note(format!("barf_seq({tokens:?})"))
        }
        fn barf_cds_seq(&mut self, mrna_id: &str) -> Result<String> {
            self.note(format!("barf_cds_seq({mrna_id})"))
        }
        fn barf_gene_tbl(&mut self, gene_id: &str) -> Result<String> {
            self.note(format!("barf_gene_tbl({gene_id})"))
        }
        fn stats(&mut self) -> Result<String> {
            self.note("stats()".to_string())
        }
        fn write_tbl(&mut self, path: &str) -> Result<String> {
            self.note(format!("write_tbl({path})"))
        }
    }

    fn invoke(
        registry: &CommandRegistry,
        controller: &mut dyn Controller,
        name: &str,
        raw_args: &str,
    ) -> Result<Reply> {
        let descriptor = registry.lookup(name).expect("command registered");
        descriptor.execute(Invocation {
            controller,
            registry,
            args: descriptor.shape().apply(raw_args),
            input: "",
        })
    }

    #[test]
    fn test_every_command_reaches_its_controller_operation() {
        let cases = [
            ("barffolder", "out/", Some("barf_folder(out/)"), "barf_folder(out/)"),
            ("loadfolder", "genome", None, "load_folder(genome)"),
            ("setfilterarg", "cds_length  min 30", None, r#"set_filter_arg(["cds_length", "min", "30"])"#),
            ("getfilterarg", "cds_length min", Some(r#"get_filter_arg(["cds_length", "min"])"#), r#"get_filter_arg(["cds_length", "min"])"#),
            ("applyfilters", "ignored", None, "apply_filters()"),
            ("barf", "anything at all", Some("barf(anything at all)"), "barf(anything at all)"),
            ("status", "", Some("status()"), "status()"),
            ("barftofile", "dump.txt", None, "barf_to_file(dump.txt)"),
            ("ducttape", "", None, "ducttape()"),
            ("removemrna", "mrna_1", None, "remove_mrna(mrna_1)"),
            ("removegene", "GAG_", None, "remove_gene(GAG_)"),
            ("subsetgenome", "seq_1 seq_2", Some(r#"subset_genome(["seq_1", "seq_2"])"#), r#"subset_genome(["seq_1", "seq_2"])"#),
            ("trimregion", "seq_1 10 20", Some(r#"trim_region(["seq_1", "10", "20"])"#), r#"trim_region(["seq_1", "10", "20"])"#),
            ("removeseq", "seq_1 -F", None, r#"remove_seq(["seq_1", "-F"])"#),
            ("invalidateregion", "seq_1 5 9", Some(r#"invalidate_region(["seq_1", "5", "9"])"#), r#"invalidate_region(["seq_1", "5", "9"])"#),
            ("barfgenegff", "gene_1", Some("barf_gene_gff(gene_1)"), "barf_gene_gff(gene_1)"),
            ("barfseq", "seq_1 1 60", Some(r#"barf_seq(["seq_1", "1", "60"])"#), r#"barf_seq(["seq_1", "1", "60"])"#),
            ("barfcdsseq", "mrna_1", Some("barf_cds_seq(mrna_1)"), "barf_cds_seq(mrna_1)"),
            ("barfgenetbl", "gene_1", Some("barf_gene_tbl(gene_1)"), "barf_gene_tbl(gene_1)"),
            ("stats", "", Some("stats()"), "stats()"),
            ("writetbl", "out.tbl", Some("write_tbl(out.tbl)"), "write_tbl(out.tbl)"),
        ];

        let registry = gag_commands();
        for (name, args, expected_reply, expected_call) in cases {
            let mut controller = RecordingController::default();
            let reply = invoke(&registry, &mut controller, name, args).unwrap();
            let expected_reply = match expected_reply {
                Some(text) => Reply::Output(text.to_string()),
                None => Reply::Silent,
            };
            assert_eq!(reply, expected_reply, "command: {name}");
            assert_eq!(controller.calls, vec![expected_call.to_string()], "command: {name}");
        }
    }

    #[test]
    fn test_getfilterhelp_trims_and_pads_output() {
        let registry = gag_commands();
        let mut controller = RecordingController::default();
        let reply = invoke(&registry, &mut controller, "getfilterhelp", "  cds_length ").unwrap();
        assert_eq!(reply, Reply::Output("\nget_filter_help(cds_length)\n".to_string()));
    }

    #[test]
    fn test_exit_requests_stop() {
        let registry = gag_commands();
        let reply = invoke(&registry, &mut DetachedController, "exit", "now").unwrap();
        assert_eq!(reply, Reply::Exit);
    }

    #[test]
    fn test_detached_controller_failures_propagate() {
        let registry = gag_commands();
        let err = invoke(&registry, &mut DetachedController, "stats", "").unwrap_err();
        assert!(err.to_string().contains("`stats` is unavailable"));
    }

    #[test]
    fn test_help_for_one_command() {
        let registry = gag_commands();
        let reply = invoke(&registry, &mut DetachedController, "help", "trimregion").unwrap();
        assert_eq!(reply, Reply::Output(HELP_TRIMREGION.to_string()));
    }

    #[test]
    fn test_help_for_undocumented_or_unknown_command() {
        let registry = gag_commands();
        for topic in ["barf", "frobnicate"] {
            let reply = invoke(&registry, &mut DetachedController, "help", topic).unwrap();
            assert_eq!(reply, Reply::Output(format!("*** No help on {topic}")));
        }
    }

    #[test]
    fn test_help_overview_lists_all_commands() {
        let registry = gag_commands();
        let Reply::Output(text) = invoke(&registry, &mut DetachedController, "help", "").unwrap()
        else {
            panic!("help should produce output");
        };
        assert!(text.starts_with("Documented commands (type help <topic>):"));
        for descriptor in registry.iter() {
            assert!(text.contains(descriptor.name()), "missing {}", descriptor.name());
        }
        let undocumented = text.split("Undocumented commands:").nth(1).unwrap();
        assert!(undocumented.contains("barftofile"));
        assert!(!undocumented.contains("stats"));
    }

    #[test]
    fn test_registry_has_full_command_set() {
        let registry = gag_commands();
        assert_eq!(registry.len(), 24);
        assert_eq!(registry.lookup("barfseq").unwrap().shape(), ArgShape::Tokens);
        assert_eq!(registry.lookup("barfcdsseq").unwrap().shape(), ArgShape::Line);
        assert_eq!(registry.lookup("stats").unwrap().shape(), ArgShape::None);
    }

    #[test]
    fn test_columnize_wraps_rows() {
        let text = columnize(&["aa", "bb", "cc"], 8);
        assert_eq!(text, "aa  bb\ncc");
    }

    #[test]
    fn test_greeting_mentions_help() {
        assert!(greeting().contains("Type 'help' for available commands."));
    }
}
