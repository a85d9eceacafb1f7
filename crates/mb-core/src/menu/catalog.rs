//! Reply texts for the menu
//!
//! Static data table mapping menu states to their prompts plus the shared
//! acknowledgment, reminder, and lifecycle texts. The transition engine
//! references these directly; nothing here contains logic.

pub const WELCOME: &str = r#"🌟 *Bienvenido a Sharma Studio & N-Capelli* 🌟

1. *Diseño Gráfico*
2. *Manejo de Redes*
3. *Programación de Página Web*
4. *Impresión de Materiales*
5. *Hablar con un Agente*
6. *Listados de precio*
7. *Cotización*
8. *Descubrir mi rutina ideal para el cabello*
9. *Tratamientos para caída, frizz o resequedad*
10. *Productos para rizos, lisos o teñidos*

👉 *Responde con el número del servicio que te interesa y con gusto te ayudaré.*

*Métodos de pago:*
Como desea pagar: link de pago, Tarjetas de crédito, transferencia."#;

pub const DESIGN_GRAPHIC: &str = r#"*Diseño Gráfico* 🎨

Ofrecemos servicios profesionales de diseño gráfico incluyendo:

• Logotipos e identidad de marca
• Materiales de marketing (folletos, tarjetas, etc.)
• Diseño de publicidad para redes sociales
• Diseño de empaques y etiquetas

*¿Qué tipo de diseño necesitas?*
1. Logotipo
2. Material impreso
3. Diseño para redes sociales
4. Otro

0. Volver al menú principal"#;

pub const SOCIAL_MEDIA: &str = r#"*Manejo de Redes Sociales* 📱

Nuestros servicios de gestión de redes sociales incluyen:

• Creación y programación de contenido
• Estrategia de marketing digital
• Análisis de métricas y resultados
• Gestión de comunidad y respuesta a comentarios

*¿Qué servicio te interesa?*
1. Estrategia completa
2. Solo creación de contenido
3. Consultoría

0. Volver al menú principal"#;

pub const WEB_DEVELOPMENT: &str = r#"*Programación de Página Web* 💻

Desarrollamos sitios web profesionales y funcionales:

• Sitios web corporativos
• Tiendas online (e-commerce)
• Landing pages
• Aplicaciones web personalizadas

*¿Qué tipo de proyecto web necesitas?*
1. Sitio web informativo
2. Tienda online
3. Rediseño de sitio existente
4. Consulta específica

0. Volver al menú principal"#;

pub const PRINTING: &str = r#"*Impresión de Materiales* 🖨️

Ofrecemos servicios completos de impresión:

• Tarjetas de presentación
• Folletos y catálogos
• Lonas y materiales de gran formato
• Artículos promocionales personalizados

*¿Qué materiales necesitas imprimir?*
1. Tarjetas de presentación
2. Folletos/Volantes
3. Impresión de gran formato
4. Otro material

0. Volver al menú principal"#;

pub const AGENT: &str = r#"*Hablar con un Agente* 👨‍💼

Un miembro de nuestro equipo se pondrá en contacto contigo a la brevedad posible.

Por favor, proporciona la siguiente información:
1. Tu nombre completo
2. El motivo de tu consulta
3. El mejor horario para contactarte

En breve, un agente se comunicará contigo. Gracias por tu paciencia.

0. Volver al menú principal"#;

pub const PRICE_LIST: &str = r#"*Listados de Precio* 💰

Nuestras tarifas varían según las especificaciones de cada proyecto.

*Selecciona una categoría para ver precios aproximados:*
1. Diseño Gráfico
2. Manejo de Redes
3. Desarrollo Web
4. Servicios de Impresión
5. Productos Capilares

0. Volver al menú principal"#;

pub const QUOTE: &str = r#"*Solicitud de Cotización* 📝

Para brindarte una cotización precisa, necesitamos algunos detalles:

1. Tipo de servicio que necesitas
2. Descripción breve del proyecto
3. Fecha límite (si aplica)
4. Presupuesto aproximado (opcional)

Por favor, envía esta información y te responderemos con una cotización detallada lo antes posible.

0. Volver al menú principal"#;

pub const ROUTINE_TYPE: &str = r#"💇‍♀ ¡Genial! Te haré algunas preguntas rápidas para encontrar la rutina perfecta para ti.
Responde con el número que se ajuste a ti:

1. ¿Qué tipo de cabello tienes?
⿡ Liso
⿢ Ondulado
⿣ Rizado
⿤ Muy rizado o afro"#;

pub const ROUTINE_CONCERN: &str = r#"2. ¿Cuál es tu principal preocupación?
⿡ Frizz
⿢ Caída
⿣ Puntas abiertas
⿤ Resequedad
⿥ Otro"#;

pub const ROUTINE_RECOMMENDATION: &str = r#"🎉 ¡Gracias por tu respuesta! Tu rutina ideal incluye estos productos:
✔ Shampoo [Producto]
✔ Mascarilla [Producto]
✔ Aceite o Serum [Producto]

🛍 ¡Compra ahora con 15% de descuento! 👉 [link tienda]
Descuento válido por 48h

0. Volver al menú principal"#;

pub const HAIR_TREATMENTS: &str = r#"🌿 Tratamientos disponibles:

💆‍♀ Para Frizz: Tratamiento anti-frizz y productos de alisado
💇‍♀ Para Caída: Fórmulas reparadoras y anti-caída
🌱 Para Resequedad: Hidratación profunda con aceites y mascarillas

👉 Ver todos los tratamientos: [link tienda]

¿Te gustaría saber más sobre alguno de estos tratamientos? Responde con el número:
⿡ Frizz
⿢ Caída
⿣ Resequedad

0. Volver al menú principal"#;

pub const HAIR_PRODUCTS: &str = r#"🌸 Productos para tu tipo de cabello:

🌿 Para Cabello Rizado: Definición y hidratación para rizos perfectos
✨ Para Cabello Liso: Alisado, brillo y control del frizz
🎨 Para Cabello Teñido: Protección del color y restauración

👉 Ver toda nuestra colección de productos: [link tienda]

¿Te gustaría saber más sobre alguno? Responde con el número:
⿡ Rizos
⿢ Liso
⿣ Teñido

0. Volver al menú principal"#;

/// Deferred follow-up sent after the routine wizard completes.
pub const REMINDER: &str = r#"🔔 ¡Hola de nuevo!
Solo quería recordarte que tu rutina personalizada sigue disponible con 15% de descuento 💖
👉 ¡Compra ahora antes que termine el descuento! [link tienda]

0. Volver al menú principal"#;

pub const CLOSING: &str = r#"Gracias por contactar a Sharma Studio & N-Capelli. ¡Esperamos poder servirte pronto!

Si necesitas algo más, no dudes en escribirnos nuevamente."#;

pub const DEFAULT: &str = r#"Lo siento, no he entendido tu respuesta. Por favor, elige una de las opciones del menú o ingresa "0" para volver al menú principal."#;

/// Generic acknowledgment for the single-level submenus.
pub const ADVISOR_FOLLOW_UP: &str = "Gracias por tu selección. Un asesor se pondrá en contacto contigo pronto para brindarte información detallada.\n\n0. Volver al menú principal";

pub const TREATMENT_FOLLOW_UP: &str = "Gracias por tu interés en nuestros tratamientos. Un especialista en cuidado capilar se pondrá en contacto contigo para brindarte información detallada.\n\n0. Volver al menú principal";

pub const PRODUCT_FOLLOW_UP: &str = "Gracias por tu interés en nuestros productos. Un asesor de belleza se pondrá en contacto contigo para recomendarte los productos ideales para tu tipo de cabello.\n\n0. Volver al menú principal";

/// Sent by the warning timer shortly before the inactivity timeout.
pub const INACTIVITY_WARNING: &str = "⏳ ¿Sigues ahí? Tu sesión está por cerrarse por inactividad. Responde cualquier mensaje para continuar.";

/// Sent by the expiry timer when the inactivity timeout closes the session.
pub const SESSION_EXPIRED: &str = "🕐 Tu sesión ha finalizado por inactividad. Escribe \"hola\" cuando quieras comenzar de nuevo.";
