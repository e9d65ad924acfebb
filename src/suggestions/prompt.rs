//! Prompt shared by every provider

const INSTRUCTIONS: &str = "\
Analiza el siguiente texto e identifica todas las frases que podrían reescribirse utilizando un lenguaje más inclusivo.
Tu objetivo es ser útil y constructivo, no cambiar radicalmente el significado original. Céntrate en el lenguaje de género, discapacidades y otras áreas comunes de mejora.
Para cada frase que identifiques, proporciona la frase original y un reemplazo más inclusivo.
Responde ÚNICAMENTE con un array de objetos JSON válido, donde cada objeto tenga dos claves: \"original\" e \"inclusive\".
Si no se necesitan cambios o el texto ya es inclusivo, devuelve un array vacío [].";

/// Build the request text for `document`
pub fn build_prompt(document: &str) -> String {
    format!("{}\n\nTEXTO A ANALIZAR:\n---\n{}\n---\n", INSTRUCTIONS, document)
}
