use fibre_registry::{BindingError, Container, Instance, Result};

struct Mailer {
  transport: &'static str,
}

fn main() -> Result<()> {
  let container = Container::create()?;

  container.singleton("mail.smtp", |_, _| Ok(Instance::new(Mailer { transport: "smtp" })));

  // Aliases can only point at something that is already bound.
  match container.alias("mail.queue", "queue") {
    Err(BindingError::Unbound { id, .. }) => println!("Refused alias for unbound '{id}'"),
    other => panic!("expected the alias to be refused, got {other:?}"),
  }

  // Aliases chain: "mailer" -> "mail" -> "mail.smtp".
  container.alias("mail.smtp", "mail")?;
  container.alias("mail", "mailer")?;
  println!("'mailer' resolves to '{}'", container.resolve_abstract("mailer"));

  let mailer = container.make_as::<Mailer>("mailer")?;
  println!("Resolved mailer using the {} transport", mailer.transport);

  container.forget("mail");
  println!("After forgetting 'mail', is 'mailer' bound? {}", container.bound("mailer"));

  container.flush();
  println!("After flush, is 'mail.smtp' bound? {}", container.bound("mail.smtp"));
  Ok(())
}
